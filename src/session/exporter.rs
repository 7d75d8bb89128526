/// CSV export of session data
///
/// Dumps either the current result set or the favorites to a file in
/// the data directory, with the same column set as the input file.

use crate::error::{Result, ScoutError};
use crate::session::Session;
use crate::store::{PropertyId, Store};

impl Session {
    /// Export the current result set to `exported_properties.csv`.
    pub async fn export_results(&self, store: &Store) -> Result<String> {
        if !self.has_results() {
            return Err(ScoutError::State("No results to export.".to_string()));
        }
        let path = self.data_dir().join("exported_properties.csv");
        let bytes = csv_bytes(store, self.results())?;
        tokio::fs::write(&path, bytes).await?;
        Ok(format!("Exported current results to {}.", path.display()))
    }

    /// Export the favorites to `exported_favorites.csv`.
    pub async fn export_favorites(&self, store: &Store) -> Result<String> {
        if self.favorites().is_empty() {
            return Err(ScoutError::State("No favorites to export.".to_string()));
        }
        let path = self.data_dir().join("exported_favorites.csv");
        let bytes = csv_bytes(store, self.favorites())?;
        tokio::fs::write(&path, bytes).await?;
        Ok(format!("Exported favorites to {}.", path.display()))
    }
}

fn csv_bytes(store: &Store, ids: &[PropertyId]) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for &id in ids {
        if let Some(property) = store.get(id) {
            writer.serialize(property)?;
        }
    }
    writer.flush()?;
    writer
        .into_inner()
        .map_err(|e| ScoutError::Io(std::io::Error::other(e.to_string())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::models::sample_property;
    use crate::store::parse_csv;

    fn setup() -> (Store, Session, tempfile::TempDir) {
        let store = Store::from_properties(vec![
            sample_property("Palm Hills", 2_500_000.0),
            sample_property("Mivida", 4_000_000.0),
        ]);
        let dir = tempfile::tempdir().unwrap();
        let mut session = Session::new(dir.path());
        session.set_results(store.ids().collect());
        (store, session, dir)
    }

    #[tokio::test]
    async fn test_export_results_writes_all_columns() {
        let (store, session, dir) = setup();

        let msg = session.export_results(&store).await.unwrap();
        assert!(msg.contains("exported_properties.csv"));

        let contents =
            std::fs::read_to_string(dir.path().join("exported_properties.csv")).unwrap();
        let header = contents.lines().next().unwrap();
        assert!(header.starts_with("type,price,bedrooms,bathrooms,area"));
        assert!(contents.contains("Palm Hills"));
        assert_eq!(contents.lines().count(), 3);
    }

    #[tokio::test]
    async fn test_export_round_trips_through_loader() {
        let (store, session, dir) = setup();
        session.export_results(&store).await.unwrap();

        let contents =
            std::fs::read_to_string(dir.path().join("exported_properties.csv")).unwrap();
        let reloaded = parse_csv(&contents).unwrap();
        assert_eq!(reloaded.len(), 2);
        let (_, p) = reloaded.iter().next().unwrap();
        assert_eq!(p.price, 2_500_000.0);
        assert_eq!(p.compound, "Palm Hills");
    }

    #[tokio::test]
    async fn test_export_favorites_only_favorites() {
        let (store, mut session, dir) = setup();
        session.add_favorite(2).unwrap();

        session.export_favorites(&store).await.unwrap();
        let contents =
            std::fs::read_to_string(dir.path().join("exported_favorites.csv")).unwrap();
        assert!(contents.contains("Mivida"));
        assert!(!contents.contains("Palm Hills"));
    }

    #[tokio::test]
    async fn test_export_with_nothing_to_export() {
        let (store, mut session, _dir) = setup();

        let err = session.export_favorites(&store).await.unwrap_err();
        assert_eq!(err.user_message(), "No favorites to export.");

        session.set_results(Vec::new());
        let err = session.export_results(&store).await.unwrap_err();
        assert_eq!(err.user_message(), "No results to export.");
    }
}
