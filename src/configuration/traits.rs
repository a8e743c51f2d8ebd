use miette::Result;

/// A configuration table that must be checked (and possibly transformed)
/// before it can be used.
pub trait ResolvableConfiguration {
    type Resolved;

    /// Validate the table and convert it into `Resolved`.
    /// Returns `Err` describing the problem if the table is invalid.
    fn resolve(self) -> Result<Self::Resolved>;
}


/// Like [`ResolvableConfiguration`], for tables whose validation depends on
/// something outside of the table itself (e.g. where the file was loaded from).
pub trait ResolvableConfigurationWithContext {
    type Context;
    type Resolved;

    /// Validate the table against `context` and convert it into `Resolved`.
    /// Returns `Err` describing the problem if the table is invalid.
    fn resolve(self, context: Self::Context) -> Result<Self::Resolved>;
}
