//! IR variables
//!
//! Variables have identity: two variables created separately never compare
//! equal, even when their name and type match.

use super::DataType;
use serde::{Serialize, Serializer};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

static NEXT_VARIABLE_ID: AtomicU64 = AtomicU64::new(0);

/// Process-unique variable identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VariableId(u64);

impl VariableId {
    fn fresh() -> Self {
        VariableId(NEXT_VARIABLE_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

#[derive(Debug)]
struct VariableData {
    id: VariableId,
    name: String,
    data_type: DataType,
}

/// Typed program variable (cheap to clone, compared by identity)
#[derive(Clone)]
pub struct Variable {
    inner: Arc<VariableData>,
}

impl Variable {
    pub fn new(name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            inner: Arc::new(VariableData {
                id: VariableId::fresh(),
                name: name.into(),
                data_type,
            }),
        }
    }

    pub fn id(&self) -> VariableId {
        self.inner.id
    }

    pub fn name(&self) -> &str {
        &self.inner.name
    }

    pub fn data_type(&self) -> DataType {
        self.inner.data_type
    }

    /// Stem used for this variable's solver symbols (`name!id`)
    pub fn symbol_stem(&self) -> String {
        format!("{}!{}", self.inner.name, self.inner.id.0)
    }
}

impl PartialEq for Variable {
    fn eq(&self, other: &Self) -> bool {
        self.inner.id == other.inner.id
    }
}

impl Eq for Variable {}

impl Hash for Variable {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.inner.id.hash(state);
    }
}

impl fmt::Debug for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}#{}: {}",
            self.inner.name, self.inner.id.0, self.inner.data_type
        )
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.inner.name)
    }
}

/// Serialized as `{ "name": ..., "data_type": ... }`; identity is not preserved.
impl Serialize for Variable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeStruct;
        let mut state = serializer.serialize_struct("Variable", 2)?;
        state.serialize_field("name", self.name())?;
        state.serialize_field("data_type", &self.data_type())?;
        state.end()
    }
}
