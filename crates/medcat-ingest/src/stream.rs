//! Streaming catalog reader.
//!
//! A single-pass state machine over the [`XmlSource`] event sequence. The
//! parser's position in the document is an explicit stack of [`Scope`]
//! variants, one per record or pending collection currently open; a child
//! record reaches its parent only when its closing event is observed, so no
//! partially-built record ever escapes. The document is never buffered.
//!
//! Dispatch follows the catalog grammar:
//!
//! - container tags (`medicines`, `analogs`, `versions`, `dosages`)
//!   (re)initialize a pending collection;
//! - record tags (`medicine`, `version`, `certificate`, `package`,
//!   `dosage`) open a builder, capturing start-only attributes;
//! - scalar tags consume the immediately-following text event and coerce
//!   it;
//! - unrecognized tags and stray text are skipped.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::debug;

use medcat_model::{
    CatalogError, CertificateBuilder, Dosage, DosageBuilder, Medicine, MedicineBuilder,
    PackageBuilder, Result, Version, VersionBuilder,
};

use crate::source::{XmlEvent, XmlSource};
use crate::tags;
use crate::value;

/// One open nesting level that maps to a domain entity or a pending
/// collection.
#[derive(Debug)]
enum Scope {
    Medicine(MedicineBuilder),
    Analogs(Vec<String>),
    Versions(Vec<Version>),
    Version(VersionBuilder),
    Certificate(CertificateBuilder),
    Package(PackageBuilder),
    Dosages(Vec<Dosage>),
    Dosage(DosageBuilder),
}

impl Scope {
    fn describe(&self) -> &'static str {
        match self {
            Scope::Medicine(_) => tags::MEDICINE,
            Scope::Analogs(_) => tags::ANALOGS,
            Scope::Versions(_) => tags::VERSIONS,
            Scope::Version(_) => tags::VERSION,
            Scope::Certificate(_) => tags::CERTIFICATE,
            Scope::Package(_) => tags::PACKAGE,
            Scope::Dosages(_) => tags::DOSAGES,
            Scope::Dosage(_) => tags::DOSAGE,
        }
    }
}

/// Single-pass, non-buffering catalog reader.
pub struct StreamingCatalogReader<R: BufRead> {
    source: XmlSource<R>,
    stack: Vec<Scope>,
    medicines: Vec<Medicine>,
}

impl StreamingCatalogReader<BufReader<File>> {
    /// Open a catalog file for streaming.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Source`] when the file cannot be opened.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self::from_source(XmlSource::open(path)?))
    }
}

impl<R: BufRead> StreamingCatalogReader<R> {
    /// Build a reader over any buffered byte stream.
    pub fn from_reader(reader: R) -> Self {
        Self::from_source(XmlSource::from_reader(reader))
    }

    /// Build a reader over an already-opened event source.
    pub fn from_source(source: XmlSource<R>) -> Self {
        Self {
            source,
            stack: Vec::new(),
            medicines: Vec::new(),
        }
    }

    /// Consume the whole event sequence and return the completed records,
    /// in document order. The returned list is owned by the caller;
    /// nothing of the parser state survives.
    ///
    /// # Errors
    ///
    /// Any [`CatalogError`]; all failures are terminal and yield no
    /// partial output.
    pub fn read_catalog(mut self) -> Result<Vec<Medicine>> {
        loop {
            match self.source.next_event()? {
                XmlEvent::Start { name, attributes } => self.handle_start(&name, &attributes)?,
                XmlEvent::End { name } => self.handle_end(&name)?,
                // Text outside a scalar field carries no mapping.
                XmlEvent::Text(_) => {}
                XmlEvent::Eof => break,
            }
        }
        if let Some(open) = self.stack.last() {
            return Err(CatalogError::malformed(
                self.source.position(),
                format!("document ended inside <{}>", open.describe()),
            ));
        }
        debug!(count = self.medicines.len(), "catalog read complete");
        Ok(self.medicines)
    }

    fn handle_start(&mut self, name: &str, attributes: &[(String, String)]) -> Result<()> {
        match name {
            tags::MEDICINES => {
                self.medicines = Vec::new();
            }
            tags::MEDICINE => {
                let mut builder = MedicineBuilder::new();
                if let Some(id) = attribute(attributes, tags::ATTR_ID) {
                    builder.set_id(id);
                }
                self.stack.push(Scope::Medicine(builder));
            }
            tags::ANALOGS => self.stack.push(Scope::Analogs(Vec::new())),
            tags::VERSIONS => self.stack.push(Scope::Versions(Vec::new())),
            tags::VERSION => {
                let mut builder = VersionBuilder::new();
                if let Some(tag) = attribute(attributes, tags::ATTR_DISTRIBUTION_VERSION) {
                    builder.set_distribution_version(tag);
                }
                self.stack.push(Scope::Version(builder));
            }
            tags::CERTIFICATE => self.stack.push(Scope::Certificate(CertificateBuilder::new())),
            tags::PACKAGE => self.stack.push(Scope::Package(PackageBuilder::new())),
            tags::DOSAGES => self.stack.push(Scope::Dosages(Vec::new())),
            tags::DOSAGE => self.stack.push(Scope::Dosage(DosageBuilder::new())),
            tags::NAME
            | tags::PHARM
            | tags::GROUP
            | tags::ANALOG
            | tags::CERTIFICATE_NUMBER
            | tags::CERTIFICATE_ISSUED_DATE_TIME
            | tags::CERTIFICATE_EXPIRES_DATE_TIME
            | tags::CERTIFICATE_REGISTERED_ORGANIZATION
            | tags::PACKAGE_TYPE
            | tags::PACKAGE_ELEMENTS_COUNT_IN
            | tags::PACKAGE_PRICE
            | tags::DOSAGE_DESCRIPTION
            | tags::DOSAGE_ACTIVE_AGENT
            | tags::DOSAGE_MAXIMUM_USE_PER_DAY => {
                let text = self.read_scalar_text(name)?;
                self.apply_scalar(name, text)?;
            }
            _ => {
                debug!(tag = name, "skipping unrecognized element");
            }
        }
        Ok(())
    }

    /// The event after a scalar start is its text content; an immediately
    /// following end event means the element was empty.
    fn read_scalar_text(&mut self, name: &str) -> Result<String> {
        match self.source.next_event()? {
            XmlEvent::Text(text) => Ok(text),
            XmlEvent::End { .. } => Ok(String::new()),
            XmlEvent::Start { name: child, .. } => Err(CatalogError::malformed(
                self.source.position(),
                format!("unexpected <{child}> inside scalar <{name}>"),
            )),
            XmlEvent::Eof => Err(CatalogError::malformed(
                self.source.position(),
                format!("document ended inside <{name}>"),
            )),
        }
    }

    fn apply_scalar(&mut self, name: &str, text: String) -> Result<()> {
        match (name, self.stack.last_mut()) {
            (tags::NAME, Some(Scope::Medicine(builder))) => builder.set_name(text),
            (tags::PHARM, Some(Scope::Medicine(builder))) => builder.set_pharm(text),
            (tags::GROUP, Some(Scope::Medicine(builder))) => builder.set_group(text),
            (tags::ANALOG, Some(Scope::Analogs(analogs))) => analogs.push(text),
            (tags::CERTIFICATE_NUMBER, Some(Scope::Certificate(builder))) => {
                builder.set_number(value::parse_long(tags::CERTIFICATE_NUMBER, &text)?);
            }
            (tags::CERTIFICATE_ISSUED_DATE_TIME, Some(Scope::Certificate(builder))) => {
                let (date, time) =
                    value::parse_date_time(tags::CERTIFICATE_ISSUED_DATE_TIME, &text)?;
                builder.set_issued(date, time);
            }
            (tags::CERTIFICATE_EXPIRES_DATE_TIME, Some(Scope::Certificate(builder))) => {
                let (date, time) =
                    value::parse_date_time(tags::CERTIFICATE_EXPIRES_DATE_TIME, &text)?;
                builder.set_expires(date, time);
            }
            (tags::CERTIFICATE_REGISTERED_ORGANIZATION, Some(Scope::Certificate(builder))) => {
                builder.set_registered_organization(text);
            }
            (tags::PACKAGE_TYPE, Some(Scope::Package(builder))) => builder.set_package_type(text),
            (tags::PACKAGE_ELEMENTS_COUNT_IN, Some(Scope::Package(builder))) => {
                builder.set_elements_count(value::parse_int(tags::PACKAGE_ELEMENTS_COUNT_IN, &text)?);
            }
            (tags::PACKAGE_PRICE, Some(Scope::Package(builder))) => {
                builder.set_price(value::parse_int(tags::PACKAGE_PRICE, &text)?);
            }
            (tags::DOSAGE_DESCRIPTION, Some(Scope::Dosage(builder))) => {
                builder.set_description(text);
            }
            (tags::DOSAGE_ACTIVE_AGENT, Some(Scope::Dosage(builder))) => {
                builder.set_active_agent(value::parse_int(tags::DOSAGE_ACTIVE_AGENT, &text)?);
            }
            (tags::DOSAGE_MAXIMUM_USE_PER_DAY, Some(Scope::Dosage(builder))) => {
                builder.set_maximum_use_per_day(value::parse_int(
                    tags::DOSAGE_MAXIMUM_USE_PER_DAY,
                    &text,
                )?);
            }
            // A known scalar outside its record context carries no mapping.
            (tag, _) => {
                debug!(tag, "skipping scalar outside its record");
            }
        }
        Ok(())
    }

    fn handle_end(&mut self, name: &str) -> Result<()> {
        match name {
            tags::MEDICINE => {
                let Some(Scope::Medicine(builder)) = self.stack.pop() else {
                    return Err(self.unexpected_close(name));
                };
                let medicine = builder.finish()?;
                debug!(id = %medicine.id, "medicine record complete");
                self.medicines.push(medicine);
            }
            tags::ANALOGS => {
                let Some(Scope::Analogs(analogs)) = self.stack.pop() else {
                    return Err(self.unexpected_close(name));
                };
                let Some(Scope::Medicine(builder)) = self.stack.last_mut() else {
                    return Err(self.unexpected_close(name));
                };
                builder.set_analogs(analogs);
            }
            tags::VERSIONS => {
                let Some(Scope::Versions(versions)) = self.stack.pop() else {
                    return Err(self.unexpected_close(name));
                };
                let Some(Scope::Medicine(builder)) = self.stack.last_mut() else {
                    return Err(self.unexpected_close(name));
                };
                builder.set_versions(versions);
            }
            tags::VERSION => {
                let Some(Scope::Version(builder)) = self.stack.pop() else {
                    return Err(self.unexpected_close(name));
                };
                let version = builder.finish()?;
                let Some(Scope::Versions(versions)) = self.stack.last_mut() else {
                    return Err(self.unexpected_close(name));
                };
                versions.push(version);
            }
            tags::CERTIFICATE => {
                let Some(Scope::Certificate(builder)) = self.stack.pop() else {
                    return Err(self.unexpected_close(name));
                };
                let certificate = builder.finish()?;
                let Some(Scope::Version(builder)) = self.stack.last_mut() else {
                    return Err(self.unexpected_close(name));
                };
                builder.set_certificate(certificate);
            }
            tags::PACKAGE => {
                let Some(Scope::Package(builder)) = self.stack.pop() else {
                    return Err(self.unexpected_close(name));
                };
                let package = builder.finish()?;
                let Some(Scope::Version(builder)) = self.stack.last_mut() else {
                    return Err(self.unexpected_close(name));
                };
                builder.set_package(package);
            }
            tags::DOSAGES => {
                let Some(Scope::Dosages(dosages)) = self.stack.pop() else {
                    return Err(self.unexpected_close(name));
                };
                let Some(Scope::Version(builder)) = self.stack.last_mut() else {
                    return Err(self.unexpected_close(name));
                };
                builder.set_dosages(dosages);
            }
            tags::DOSAGE => {
                let Some(Scope::Dosage(builder)) = self.stack.pop() else {
                    return Err(self.unexpected_close(name));
                };
                let dosage = builder.finish()?;
                let Some(Scope::Dosages(dosages)) = self.stack.last_mut() else {
                    return Err(self.unexpected_close(name));
                };
                dosages.push(dosage);
            }
            // Root container close and scalar/unknown closes carry no action.
            _ => {}
        }
        Ok(())
    }

    fn unexpected_close(&self, name: &str) -> CatalogError {
        CatalogError::malformed(self.source.position(), format!("unexpected </{name}>"))
    }
}

/// Look up an attribute by local name.
fn attribute<'a>(attributes: &'a [(String, String)], key: &str) -> Option<&'a str> {
    attributes
        .iter()
        .find(|(name, _)| name == key)
        .map(|(_, value)| value.as_str())
}

/// Read a catalog file with the streaming parser.
///
/// # Errors
///
/// Any [`CatalogError`]; all failures are terminal and yield no partial
/// output.
pub fn read_catalog(path: impl AsRef<Path>) -> Result<Vec<Medicine>> {
    StreamingCatalogReader::open(path)?.read_catalog()
}

/// Read a catalog from an in-memory or already-opened byte stream.
pub fn read_catalog_from<R: BufRead>(reader: R) -> Result<Vec<Medicine>> {
    StreamingCatalogReader::from_reader(reader).read_catalog()
}
