use serde::Deserialize;

/// Request body for `PUT /user/update/:id`.
///
/// Clients usually send a whole user; an `id` field in the body is ignored.
#[derive(Debug, Deserialize)]
pub struct UpdateUserRequest {
    pub email: String,
    pub password: String,
}
