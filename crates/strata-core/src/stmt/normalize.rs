use super::Record;

/// Strips every unset field from a record.
///
/// Only [`Value::Unset`](super::Value::Unset) is removed; null, `0`, `false`
/// and `""` are real values and survive. Normalizing twice yields the same
/// record.
pub fn normalize(mut record: Record) -> Record {
    record.retain(|_, value| !value.is_unset());
    record
}

impl Record {
    /// See [`normalize`].
    pub fn normalized(self) -> Record {
        normalize(self)
    }
}
