//! Encoder configuration.

/// How much of the data table each value occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SlotPolicy {
    /// Slot = encoded value, padded to 4 bytes.
    #[default]
    Compact,
    /// Slot = `max(data_len, max_len)`, padded to 4 bytes. Keeps the
    /// headroom a producer reserved for in-place edits.
    Reserved,
}

/// Encoder configuration
#[derive(Debug, Clone)]
pub struct EncodeConfig {
    pub slot_policy: SlotPolicy,
    /// Header version to write instead of `Document::version`.
    pub version: Option<u32>,
    /// Initial output buffer capacity in bytes.
    pub initial_capacity: usize,
}

impl Default for EncodeConfig {
    fn default() -> Self {
        Self {
            slot_policy: SlotPolicy::Compact,
            version: None,
            initial_capacity: 1024,
        }
    }
}

impl EncodeConfig {
    #[must_use]
    pub fn slot_policy(mut self, policy: SlotPolicy) -> Self {
        self.slot_policy = policy;
        self
    }

    #[must_use]
    pub fn version(mut self, version: u32) -> Self {
        self.version = Some(version);
        self
    }

    #[must_use]
    pub fn initial_capacity(mut self, capacity: usize) -> Self {
        self.initial_capacity = capacity;
        self
    }
}
