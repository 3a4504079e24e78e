//! Wire types returned by the CouchDB admin API.

use serde::{Deserialize, Deserializer, Serialize};

/// Security object of a single database (`GET /{db}/_security`).
///
/// CouchDB returns `{}` for a database that never had its security set, so
/// both components default to empty. Explicit `null` values are treated the
/// same way.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecurityDocument {
    #[serde(default, deserialize_with = "null_as_default")]
    pub admins: SecurityComponent,

    #[serde(default, deserialize_with = "null_as_default")]
    pub members: SecurityComponent,
}

/// One security class of a [`SecurityDocument`].
///
/// `names` and `roles` are independent arrays in the upstream document. They
/// are read as positionally paired (`names[i]` holds `roles[i]`).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecurityComponent {
    #[serde(default, deserialize_with = "null_as_default")]
    pub names: Vec<String>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub roles: Vec<String>,
}

impl SecurityComponent {
    /// Build a component from name and role lists.
    pub fn new<N, R>(names: N, roles: R) -> Self
    where
        N: IntoIterator,
        N::Item: Into<String>,
        R: IntoIterator,
        R::Item: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
            roles: roles.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns true when the name and role lists can be paired by index.
    pub fn is_paired(&self) -> bool {
        self.names.len() == self.roles.len()
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
