use crate::config::constants::{default_port_purpose, MAX_PORT, MIN_PORT};
use crate::enums::inline_edit_event::InlineEditEvent;
use crate::errors::{PortalError, PortalResult};
use crate::structs::port_usage_record::PortUsageRecord;

/// Operations on a port list. Ports are unique within a list.
pub struct PortEditor;

impl PortEditor {
    pub fn parse_port(input: &str) -> PortalResult<u16> {
        let trimmed = input.trim();
        let value: u32 = trimmed
            .parse()
            .map_err(|_| PortalError::port_rejected(input, "not a number"))?;
        if value < u32::from(MIN_PORT) || value > u32::from(MAX_PORT) {
            return Err(PortalError::port_rejected(
                input,
                &format!("must be between {} and {}", MIN_PORT, MAX_PORT),
            ));
        }
        Ok(value as u16)
    }

    /// Appends a port. Invalid or duplicate ports leave the list untouched.
    /// A blank purpose becomes the default port label.
    pub fn add_port(ports: &mut Vec<PortUsageRecord>, input: &str, purpose: &str) -> PortalResult<u16> {
        let port = Self::parse_port(input)?;
        if ports.iter().any(|p| p.internal_port == port) {
            return Err(PortalError::port_rejected(input, "already in the list"));
        }
        let purpose = purpose.trim();
        let purpose = if purpose.is_empty() {
            default_port_purpose(port)
        } else {
            purpose.to_string()
        };
        ports.push(PortUsageRecord {
            internal_port: port,
            usage_purpose: purpose,
        });
        Ok(port)
    }

    pub fn remove_port(ports: &mut Vec<PortUsageRecord>, port: u16) -> bool {
        let before = ports.len();
        ports.retain(|p| p.internal_port != port);
        before != ports.len()
    }

    /// Partial update keyed by port number; no-op when the port is absent.
    pub fn update_port_purpose(ports: &mut [PortUsageRecord], port: u16, purpose: &str) -> bool {
        match ports.iter_mut().find(|p| p.internal_port == port) {
            Some(record) => {
                record.usage_purpose = purpose.to_string();
                true
            }
            None => false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct PurposeBuffer {
    port: u16,
    text: String,
}

/// Per-row purpose editing. Typed text stays in a local buffer and is only
/// written to the owning list on Enter or blur.
#[derive(Debug, Default)]
pub struct PortPurposeEditor {
    buffer: Option<PurposeBuffer>,
}

impl PortPurposeEditor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts editing `port`, seeding the buffer with its current purpose.
    pub fn focus(&mut self, ports: &[PortUsageRecord], port: u16) -> bool {
        match ports.iter().find(|p| p.internal_port == port) {
            Some(record) => {
                self.buffer = Some(PurposeBuffer {
                    port,
                    text: record.usage_purpose.clone(),
                });
                true
            }
            None => false,
        }
    }

    pub fn editing_port(&self) -> Option<u16> {
        self.buffer.as_ref().map(|b| b.port)
    }

    pub fn buffered_text(&self) -> Option<&str> {
        self.buffer.as_ref().map(|b| b.text.as_str())
    }

    /// Returns `true` when the event wrote the buffer back to `ports`.
    pub fn handle(&mut self, event: InlineEditEvent, ports: &mut [PortUsageRecord]) -> bool {
        match event {
            InlineEditEvent::Input(text) => {
                if let Some(buffer) = self.buffer.as_mut() {
                    buffer.text = text;
                }
                false
            }
            InlineEditEvent::Enter | InlineEditEvent::Blur => self.commit(ports),
        }
    }

    fn commit(&mut self, ports: &mut [PortUsageRecord]) -> bool {
        let Some(buffer) = self.buffer.take() else {
            return false;
        };
        let text = buffer.text.trim();
        let purpose = if text.is_empty() {
            default_port_purpose(buffer.port)
        } else {
            text.to_string()
        };
        PortEditor::update_port_purpose(ports, buffer.port, &purpose)
    }
}
