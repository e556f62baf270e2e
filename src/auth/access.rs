use crate::model::user::{Identity, Role};

/// Whether a view is reachable for the given identity. Pure; evaluated on
/// every navigation. No identity means redirect to login; a role mismatch
/// means redirect to the default authenticated view.
pub fn can_access(identity: Option<&Identity>, required_roles: Option<&[Role]>) -> bool {
    let Some(identity) = identity else {
        return false;
    };
    match required_roles {
        Some(roles) => roles.contains(&identity.role),
        None => true,
    }
}
