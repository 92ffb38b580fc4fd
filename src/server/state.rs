use crate::location::LocationResolver;

/// Shared, read-only server state. The resolver never mutates its table,
/// so handlers borrow it without locking.
pub struct AppState {
    pub resolver: LocationResolver,
}
