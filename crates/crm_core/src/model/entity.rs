//! Shared contract implemented by every CRM record type.

/// Integer identifier shared by all collections.
pub type EntityId = i64;

/// A record that can live in an in-memory collection.
///
/// `Draft` is the record without its `Id` (input of `create`), `Patch` is the
/// partial record accepted by `update`. Neither shape carries an `Id`, so the
/// identifier of a stored record can never change through the service API.
pub trait Entity: Clone + Send + Sync + 'static {
    type Draft: Send + 'static;
    type Patch: Send + 'static;

    /// Human-readable kind used in errors and log lines (`Contact`, `Deal`, ...).
    const KIND: &'static str;

    fn id(&self) -> EntityId;

    /// Builds the stored record for a freshly assigned `id`.
    fn from_draft(id: EntityId, draft: Self::Draft) -> Self;

    /// Merges `patch` onto `self`; fields absent from the patch are retained.
    fn apply_patch(&mut self, patch: Self::Patch);
}
