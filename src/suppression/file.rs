//! XML persistence for suppressions.
//!
//! ```xml
//! <?xml version="1.0" encoding="utf-8"?>
//! <Suppressions xmlns:xsd="http://www.w3.org/2001/XMLSchema" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">
//!   <Suppression>
//!     <DiagnosticId>CP0002</DiagnosticId>
//!     <Target>M:Lib.Widget.Foo(System.Int32)</Target>
//!     <Left>lib/net8.0/Lib.dll</Left>
//!     <Right>lib/net9.0/Lib.dll</Right>
//!     <IsBaselineSuppression>true</IsBaselineSuppression>
//!   </Suppression>
//! </Suppressions>
//! ```
//!
//! Absent fields are not written and `IsBaselineSuppression` only appears when it is true.
//! The reader accepts self-closing elements as absent values and skips unknown elements.

use quick_xml::{
    events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event},
    Reader, Writer,
};

use crate::{suppression::Suppression, Error, Result};

const ROOT: &[u8] = b"Suppressions";
const RECORD: &[u8] = b"Suppression";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    DiagnosticId,
    Target,
    Left,
    Right,
    IsBaselineSuppression,
}

impl Field {
    fn from_name(name: &[u8]) -> Option<Field> {
        match name {
            b"DiagnosticId" => Some(Field::DiagnosticId),
            b"Target" => Some(Field::Target),
            b"Left" => Some(Field::Left),
            b"Right" => Some(Field::Right),
            b"IsBaselineSuppression" => Some(Field::IsBaselineSuppression),
            _ => None,
        }
    }
}

#[derive(Default)]
struct PartialRecord {
    diagnostic_id: Option<String>,
    target: Option<String>,
    left: Option<String>,
    right: Option<String>,
    is_baseline: bool,
}

impl PartialRecord {
    fn set(&mut self, field: Field, value: &str) -> Result<()> {
        let value = value.trim();
        if value.is_empty() {
            return Ok(());
        }

        match field {
            Field::DiagnosticId => self.diagnostic_id = Some(value.to_string()),
            Field::Target => self.target = Some(value.to_string()),
            Field::Left => self.left = Some(value.to_string()),
            Field::Right => self.right = Some(value.to_string()),
            Field::IsBaselineSuppression => {
                self.is_baseline = match value.to_ascii_lowercase().as_str() {
                    "true" => true,
                    "false" => false,
                    other => {
                        return Err(malformed_error!(
                            "Invalid IsBaselineSuppression value '{}'",
                            other
                        ))
                    }
                }
            }
        }
        Ok(())
    }

    fn build(self) -> Result<Suppression> {
        let Some(diagnostic_id) = self.diagnostic_id else {
            return Err(malformed_error!("Suppression without a DiagnosticId"));
        };

        Ok(Suppression {
            diagnostic_id,
            target: self.target,
            left: self.left,
            right: self.right,
            is_baseline_suppression: self.is_baseline,
        }
        .normalized())
    }
}

/// Parse a suppression document.
///
/// # Errors
/// Returns [`crate::Error::Malformed`] if the document is not well-formed, has no
/// `Suppressions` root, or contains a record without a diagnostic id.
pub(crate) fn parse(content: &str) -> Result<Vec<Suppression>> {
    let mut reader = Reader::from_str(content);
    reader.config_mut().trim_text(true);

    let mut suppressions = Vec::new();
    let mut saw_root = false;
    let mut current: Option<PartialRecord> = None;
    let mut field: Option<Field> = None;

    loop {
        let event = match reader.read_event() {
            Ok(event) => event,
            Err(error) => {
                return Err(malformed_error!(
                    "Invalid suppression XML at position {}: {}",
                    reader.buffer_position(),
                    error
                ))
            }
        };

        match event {
            Event::Start(element) => {
                let name = element.name();
                if name.as_ref() == ROOT {
                    saw_root = true;
                } else if name.as_ref() == RECORD {
                    if current.is_some() {
                        return Err(malformed_error!("Nested Suppression element"));
                    }
                    current = Some(PartialRecord::default());
                } else {
                    field = Field::from_name(name.as_ref());
                }
            }
            Event::Empty(element) => {
                let name = element.name();
                if name.as_ref() == ROOT {
                    saw_root = true;
                } else if name.as_ref() == RECORD {
                    PartialRecord::default().build()?;
                }
            }
            Event::Text(text) => {
                if let (Some(record), Some(active)) = (current.as_mut(), field) {
                    let value = text
                        .unescape()
                        .map_err(|e| malformed_error!("Invalid text in suppression: {}", e))?;
                    record.set(active, &value)?;
                }
            }
            Event::End(element) => {
                if element.name().as_ref() == RECORD {
                    match current.take() {
                        Some(record) => suppressions.push(record.build()?),
                        None => return Err(malformed_error!("Unbalanced Suppression element")),
                    }
                }
                field = None;
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if current.is_some() {
        return Err(malformed_error!("Unterminated Suppression element"));
    }
    if !saw_root {
        return Err(malformed_error!("Missing Suppressions root element"));
    }

    Ok(suppressions)
}

fn emit(writer: &mut Writer<Vec<u8>>, event: Event<'_>) -> Result<()> {
    writer
        .write_event(event)
        .map_err(|e| Error::Xml(e.to_string()))
}

fn emit_field(writer: &mut Writer<Vec<u8>>, name: &str, value: &str) -> Result<()> {
    emit(writer, Event::Start(BytesStart::new(name)))?;
    emit(writer, Event::Text(BytesText::new(value)))?;
    emit(writer, Event::End(BytesEnd::new(name)))
}

/// Serialize suppressions in the given order.
///
/// # Errors
/// Returns [`crate::Error::Xml`] if the writer fails.
pub(crate) fn serialize<'a, I>(suppressions: I) -> Result<Vec<u8>>
where
    I: IntoIterator<Item = &'a Suppression>,
{
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);

    emit(
        &mut writer,
        Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)),
    )?;

    let mut root = BytesStart::new("Suppressions");
    root.push_attribute(("xmlns:xsd", "http://www.w3.org/2001/XMLSchema"));
    root.push_attribute(("xmlns:xsi", "http://www.w3.org/2001/XMLSchema-instance"));
    emit(&mut writer, Event::Start(root))?;

    for suppression in suppressions {
        emit(&mut writer, Event::Start(BytesStart::new("Suppression")))?;
        emit_field(&mut writer, "DiagnosticId", &suppression.diagnostic_id)?;
        if let Some(target) = &suppression.target {
            emit_field(&mut writer, "Target", target)?;
        }
        if let Some(left) = &suppression.left {
            emit_field(&mut writer, "Left", left)?;
        }
        if let Some(right) = &suppression.right {
            emit_field(&mut writer, "Right", right)?;
        }
        if suppression.is_baseline_suppression {
            emit_field(&mut writer, "IsBaselineSuppression", "true")?;
        }
        emit(&mut writer, Event::End(BytesEnd::new("Suppression")))?;
    }

    emit(&mut writer, Event::End(BytesEnd::new("Suppressions")))?;

    let mut bytes = writer.into_inner();
    bytes.push(b'\n');
    Ok(bytes)
}
