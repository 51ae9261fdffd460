use uuid::Uuid;

/// Short shareable session code: the first six hex chars of a v4 UUID,
/// uppercased. Uniqueness is enforced by the store's constraint; a collision
/// surfaces as a Conflict instead of being retried here.
pub fn generate() -> String {
    Uuid::new_v4().simple().to_string()[..6].to_uppercase()
}
