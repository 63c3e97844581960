//! Entity registry for startup-time schema materialization
//!
//! Applications register their entity types once at startup and hand the
//! registry to a session to create the storage for all of them in one call.

use crate::active_model::{Entity, RecordError};
use crate::descriptor::EntityDescriptor;
use crate::session::Session;

/// The entity types an application persists.
///
/// Registering a type twice, or two types mapped to the same table, keeps the
/// first registration.
///
/// ```
/// use activebase::registry::Registry;
/// use activebase::session::MemorySession;
/// use activebase::{Record, Status};
///
/// #[derive(Debug, Default, Record)]
/// struct Note {
///     #[primary_key]
///     id: Option<i64>,
///     active: Status,
///     body: String,
/// }
///
/// # fn main() -> Result<(), activebase::RecordError> {
/// let registry = Registry::new().register::<Note>();
/// let session = MemorySession::new();
/// registry.create_all(&session)?;
/// registry.create_all(&session)?; // idempotent
/// assert!(session.has_table("note"));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct Registry {
    descriptors: Vec<&'static EntityDescriptor>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an entity type, builder style.
    pub fn register<E: Entity>(mut self) -> Self {
        self.add(E::entity_descriptor());
        self
    }

    /// Register a descriptor.
    ///
    /// Returns `false` when its table was already registered.
    pub fn add(&mut self, descriptor: &'static EntityDescriptor) -> bool {
        if let Some(existing) = self.get(descriptor.table_name) {
            if existing != descriptor {
                log::warn!(
                    "Table {} is already registered for {}, ignoring {}",
                    descriptor.table_name,
                    existing.type_name,
                    descriptor.type_name
                );
            }
            return false;
        }
        self.descriptors.push(descriptor);
        true
    }

    /// Descriptor registered for `table`.
    pub fn get(&self, table: &str) -> Option<&'static EntityDescriptor> {
        self.descriptors
            .iter()
            .copied()
            .find(|d| d.table_name == table)
    }

    /// Registered descriptors in registration order.
    pub fn descriptors(&self) -> &[&'static EntityDescriptor] {
        &self.descriptors
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    /// Create storage for every registered entity that does not have it yet.
    pub fn create_all<S: Session + ?Sized>(&self, session: &S) -> Result<(), RecordError> {
        log::info!("Creating storage for {} entities", self.descriptors.len());
        session.create_all(&self.descriptors)?;
        Ok(())
    }
}
