//! Domain model: the wire type plus view-side predicates.

pub use padron_api::Persona;

/// Case-insensitive "contains" match across every displayed column.
///
/// An empty query matches everything, mirroring a cleared filter box.
pub fn matches_global(persona: &Persona, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    let needle = query.to_lowercase();
    persona.nombre.to_lowercase().contains(&needle)
        || persona.direccion.to_lowercase().contains(&needle)
        || persona.telefono.to_lowercase().contains(&needle)
}
