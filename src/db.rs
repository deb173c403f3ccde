use mongodb::bson::{Bson, Document};
use mongodb::error::Result;
use mongodb::{Client, Collection};

use crate::config::Settings;

/// An open document-store connection plus the selected logical database.
///
/// Collection references pass through an alias table: the configured users and
/// servers names resolve to their own collections, anything else is taken as a
/// literal collection name. Driver errors propagate unchanged; there are no
/// retries and no health checks.
pub struct Database {
    db: mongodb::Database,
    users: String,
    servers: String,
}

impl Database {
    /// Open a connection using the configured URL and cluster name.
    ///
    /// The driver connects lazily, so this only fails on a malformed URL.
    pub async fn connect(settings: &Settings) -> Result<Self> {
        let client = Client::with_uri_str(&settings.database_url).await?;

        Ok(Self {
            db: client.database(&settings.database_cluster),
            users: settings.database_users.clone(),
            servers: settings.database_servers.clone(),
        })
    }

    fn resolve(&self, collection: &str) -> Collection<Document> {
        self.db
            .collection(resolve_name(&self.users, &self.servers, collection))
    }

    /// Insert one document, returning the store-assigned id.
    pub async fn insert(&self, collection: &str, document: Document) -> Result<Bson> {
        let result = self.resolve(collection).insert_one(document).await?;

        Ok(result.inserted_id)
    }

    /// Find the first document matching `query`, if any.
    pub async fn find(
        &self,
        collection: &str,
        query: Document,
        projection: Option<Document>,
    ) -> Result<Option<Document>> {
        let collection = self.resolve(collection);
        let mut find = collection.find_one(query);
        if let Some(projection) = projection {
            find = find.projection(projection);
        }

        find.await
    }
}

fn resolve_name<'a>(users: &'a str, servers: &'a str, collection: &'a str) -> &'a str {
    if collection == users {
        users
    } else if collection == servers {
        servers
    } else {
        collection
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configured_names_resolve_to_distinct_collections() {
        assert_eq!(resolve_name("members", "guilds", "members"), "members");
        assert_eq!(resolve_name("members", "guilds", "guilds"), "guilds");
        assert_ne!(
            resolve_name("members", "guilds", "members"),
            resolve_name("members", "guilds", "guilds")
        );
    }

    #[test]
    fn unknown_references_pass_through_unchanged() {
        assert_eq!(resolve_name("members", "guilds", "audit_log"), "audit_log");
    }

    #[tokio::test]
    async fn resolution_selects_the_expected_collection_handles() {
        // The driver does not dial out until the first operation, so a
        // handle against an unreachable URL is fine here.
        let client = Client::with_uri_str("mongodb://localhost:27017")
            .await
            .unwrap();
        let db = Database {
            db: client.database("quill"),
            users: "members".to_string(),
            servers: "guilds".to_string(),
        };

        assert_eq!(db.resolve("members").name(), "members");
        assert_eq!(db.resolve("guilds").name(), "guilds");
        assert_eq!(db.resolve("sessions").name(), "sessions");
    }
}
