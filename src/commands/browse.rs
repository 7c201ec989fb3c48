//! Browse command - interactive terminal browser

use super::{DataPaths, load_with_spinner};
use crate::browse::{BrowseSession, SessionSettings};
use crate::catalog::Catalog;
use crate::cli::FilterArgs;
use crate::config::CollectrConfig;
use crate::ui::BrowseApp;

type Result<T> = std::result::Result<T, crate::CollectrError>;

/// Execute the browse command
///
/// A dataset that fails to load does not abort: the browser opens on a
/// static failure screen instead.
///
/// # Errors
/// Returns an error if the terminal cannot be set up or drawn to.
pub fn execute(
    paths: &DataPaths,
    config: &CollectrConfig,
    collection: Option<&str>,
    filters: &FilterArgs,
    quiet: bool,
) -> Result<()> {
    let (catalog, load_error) = match load_with_spinner(paths, quiet) {
        Ok(catalog) => (catalog, None),
        Err(e) => {
            tracing::error!(error = %e, "failed to load dataset");
            (Catalog::default(), Some(e.to_string()))
        }
    };

    let settings = SessionSettings::from(config);
    let sort = filters.sort.unwrap_or(settings.default_sort);
    let filter = filters.to_filter_state(settings.show_no_source);

    let mut session = BrowseSession::new(&catalog, settings).with_state(filter, sort);
    if let Some(name) = collection {
        session = session.with_collection(name);
    }

    let mut app = BrowseApp::new(session);
    if let Some(message) = load_error {
        app = app.with_load_error(message);
    }
    app.run()?;
    Ok(())
}
