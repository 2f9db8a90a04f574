//! Buffered (tree-based) catalog reader.
//!
//! The whole document is materialized into a lightweight element tree and
//! then mapped to records by descendant lookup. Same mapping, same builders,
//! same failure surface as the streaming reader; the trade is memory for the
//! freedom to look fields up out of event order. Use the streaming reader
//! unless the document is small and random access is genuinely convenient.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use medcat_model::{
    CatalogError, Certificate, CertificateBuilder, Dosage, DosageBuilder, Medicine,
    MedicineBuilder, PackageBuilder, PackageInfo, Result, Version, VersionBuilder,
};

use crate::source::{XmlEvent, XmlSource};
use crate::tags;
use crate::value;

/// One node of the buffered document tree.
#[derive(Debug, Default)]
struct XmlElement {
    name: String,
    attributes: Vec<(String, String)>,
    children: Vec<XmlElement>,
    text: String,
}

impl XmlElement {
    fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, value)| value.as_str())
    }

    /// All descendant elements with the given name, in document order.
    fn find_all<'a>(&'a self, name: &str, out: &mut Vec<&'a XmlElement>) {
        for child in &self.children {
            if child.name == name {
                out.push(child);
            }
            child.find_all(name, out);
        }
    }

    fn descendants(&self, name: &str) -> Vec<&XmlElement> {
        let mut out = Vec::new();
        self.find_all(name, &mut out);
        out
    }

    /// First descendant with the given name.
    fn first(&self, name: &str) -> Option<&XmlElement> {
        for child in &self.children {
            if child.name == name {
                return Some(child);
            }
            if let Some(found) = child.first(name) {
                return Some(found);
            }
        }
        None
    }

    /// Text content of the first descendant with the given name.
    fn field_text(&self, name: &str) -> Option<&str> {
        self.first(name).map(|element| element.text.as_str())
    }
}

/// Buffer the whole event sequence into a tree under a synthetic root.
fn build_tree<R: BufRead>(source: &mut XmlSource<R>) -> Result<XmlElement> {
    let mut stack = vec![XmlElement::default()];
    loop {
        match source.next_event()? {
            XmlEvent::Start { name, attributes } => {
                stack.push(XmlElement {
                    name,
                    attributes,
                    children: Vec::new(),
                    text: String::new(),
                });
            }
            XmlEvent::Text(text) => {
                if let Some(open) = stack.last_mut() {
                    open.text.push_str(&text);
                }
            }
            XmlEvent::End { name } => {
                let element = stack.pop();
                match (element, stack.last_mut()) {
                    (Some(element), Some(parent)) => parent.children.push(element),
                    _ => {
                        return Err(CatalogError::malformed(
                            source.position(),
                            format!("unexpected </{name}>"),
                        ));
                    }
                }
            }
            XmlEvent::Eof => break,
        }
    }
    match stack.pop() {
        Some(root) if stack.is_empty() => Ok(root),
        _ => Err(CatalogError::malformed(
            source.position(),
            "document ended with unclosed elements",
        )),
    }
}

fn map_catalog(root: &XmlElement) -> Result<Vec<Medicine>> {
    let mut medicines = Vec::new();
    for element in root.descendants(tags::MEDICINE) {
        medicines.push(map_medicine(element)?);
    }
    Ok(medicines)
}

fn map_medicine(element: &XmlElement) -> Result<Medicine> {
    let mut builder = MedicineBuilder::new();
    if let Some(id) = element.attribute(tags::ATTR_ID) {
        builder.set_id(id);
    }
    if let Some(name) = element.field_text(tags::NAME) {
        builder.set_name(name);
    }
    if let Some(pharm) = element.field_text(tags::PHARM) {
        builder.set_pharm(pharm);
    }
    if let Some(group) = element.field_text(tags::GROUP) {
        builder.set_group(group);
    }
    builder.set_analogs(
        element
            .descendants(tags::ANALOG)
            .into_iter()
            .map(|analog| analog.text.clone())
            .collect(),
    );
    let mut versions = Vec::new();
    for version in element.descendants(tags::VERSION) {
        versions.push(map_version(version)?);
    }
    builder.set_versions(versions);
    builder.finish()
}

fn map_version(element: &XmlElement) -> Result<Version> {
    let mut builder = VersionBuilder::new();
    if let Some(tag) = element.attribute(tags::ATTR_DISTRIBUTION_VERSION) {
        builder.set_distribution_version(tag);
    }
    if let Some(certificate) = element.first(tags::CERTIFICATE) {
        builder.set_certificate(map_certificate(certificate)?);
    }
    if let Some(package) = element.first(tags::PACKAGE) {
        builder.set_package(map_package(package)?);
    }
    let mut dosages = Vec::new();
    for dosage in element.descendants(tags::DOSAGE) {
        dosages.push(map_dosage(dosage)?);
    }
    builder.set_dosages(dosages);
    builder.finish()
}

fn map_certificate(element: &XmlElement) -> Result<Certificate> {
    let mut builder = CertificateBuilder::new();
    if let Some(text) = element.field_text(tags::CERTIFICATE_NUMBER) {
        builder.set_number(value::parse_long(tags::CERTIFICATE_NUMBER, text)?);
    }
    if let Some(text) = element.field_text(tags::CERTIFICATE_ISSUED_DATE_TIME) {
        let (date, time) = value::parse_date_time(tags::CERTIFICATE_ISSUED_DATE_TIME, text)?;
        builder.set_issued(date, time);
    }
    if let Some(text) = element.field_text(tags::CERTIFICATE_EXPIRES_DATE_TIME) {
        let (date, time) = value::parse_date_time(tags::CERTIFICATE_EXPIRES_DATE_TIME, text)?;
        builder.set_expires(date, time);
    }
    if let Some(text) = element.field_text(tags::CERTIFICATE_REGISTERED_ORGANIZATION) {
        builder.set_registered_organization(text);
    }
    builder.finish()
}

fn map_package(element: &XmlElement) -> Result<PackageInfo> {
    let mut builder = PackageBuilder::new();
    if let Some(text) = element.field_text(tags::PACKAGE_TYPE) {
        builder.set_package_type(text);
    }
    if let Some(text) = element.field_text(tags::PACKAGE_ELEMENTS_COUNT_IN) {
        builder.set_elements_count(value::parse_int(tags::PACKAGE_ELEMENTS_COUNT_IN, text)?);
    }
    if let Some(text) = element.field_text(tags::PACKAGE_PRICE) {
        builder.set_price(value::parse_int(tags::PACKAGE_PRICE, text)?);
    }
    builder.finish()
}

fn map_dosage(element: &XmlElement) -> Result<Dosage> {
    let mut builder = DosageBuilder::new();
    if let Some(text) = element.field_text(tags::DOSAGE_DESCRIPTION) {
        builder.set_description(text);
    }
    if let Some(text) = element.field_text(tags::DOSAGE_ACTIVE_AGENT) {
        builder.set_active_agent(value::parse_int(tags::DOSAGE_ACTIVE_AGENT, text)?);
    }
    if let Some(text) = element.field_text(tags::DOSAGE_MAXIMUM_USE_PER_DAY) {
        builder.set_maximum_use_per_day(value::parse_int(tags::DOSAGE_MAXIMUM_USE_PER_DAY, text)?);
    }
    builder.finish()
}

/// Read a catalog file with the buffered parser.
///
/// Produces the same records as [`crate::stream::read_catalog`] for any
/// conforming document.
///
/// # Errors
///
/// Any [`CatalogError`]; all failures are terminal and yield no partial
/// output.
pub fn read_catalog_buffered(path: impl AsRef<Path>) -> Result<Vec<Medicine>> {
    let mut source = XmlSource::open(path)?;
    let root = build_tree(&mut source)?;
    map_catalog(&root)
}

/// Read a catalog from an in-memory or already-opened byte stream with the
/// buffered parser.
pub fn read_catalog_buffered_from<R: BufRead>(reader: R) -> Result<Vec<Medicine>> {
    let mut source = XmlSource::from_reader(reader);
    let root = build_tree(&mut source)?;
    map_catalog(&root)
}
