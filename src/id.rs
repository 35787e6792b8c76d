use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Server-assigned numeric project identifier
#[derive(Debug, Default, Clone, Copy, Eq, PartialEq, Hash)]
pub struct ProjectId {
    value: u64,
}

impl ProjectId {
    pub fn new(id: u64) -> Self { Self { value: id } }

    pub fn value(&self) -> u64 { self.value }
}

impl<'de> Deserialize<'de> for ProjectId {
    fn deserialize<D>(deserializer: D) -> Result<ProjectId, D::Error>
        where D: Deserializer<'de>,
    {
        let id = u64::deserialize(deserializer)?;
        Ok(ProjectId::new(id))
    }
}

impl Serialize for ProjectId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
        where S: Serializer,
    {
        self.value.serialize(serializer)
    }
}

impl std::fmt::Display for ProjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}
