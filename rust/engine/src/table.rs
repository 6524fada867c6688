/// What a handler needs to know about the table it serves
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TableShare {
    name: String,
    record_length: usize,
}

impl TableShare {
    pub fn new(name: impl Into<String>, record_length: usize) -> Self {
        Self {
            name: name.into(),
            record_length,
        }
    }

    /// `db/table` style name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Size of one record image (`reclength`); constant for the table
    pub fn record_length(&self) -> usize {
        self.record_length
    }
}
