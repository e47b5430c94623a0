//! Table access over the platform's REST surface.
//!
//! A thin query builder in the platform's own dialect: filters are
//! `column=eq.value` pairs, ordering is `order=column.direction`, and
//! writes choose their echo behavior via the `Prefer` header. Only the
//! operators Luxe actually uses are modeled.

use reqwest::Method;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::PlatformError;
use crate::client::{KeyKind, PlatformClient};

/// Sort direction for [`SelectQuery::order`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    const fn suffix(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

/// Handle to one platform table.
#[derive(Clone)]
pub struct Table {
    client: PlatformClient,
    name: String,
    key: KeyKind,
}

impl PlatformClient {
    /// Access a table with the public anon key (row-level access rules
    /// apply).
    #[must_use]
    pub fn table(&self, name: &str) -> Table {
        Table {
            client: self.clone(),
            name: name.to_owned(),
            key: KeyKind::Anon,
        }
    }

    /// Access a table with the privileged service key (CLI utilities
    /// only).
    #[must_use]
    pub fn table_privileged(&self, name: &str) -> Table {
        Table {
            client: self.clone(),
            name: name.to_owned(),
            key: KeyKind::Service,
        }
    }
}

impl Table {
    fn path(&self) -> String {
        format!("rest/v1/{}", self.name)
    }

    /// Start a read of the given columns (`*` for all).
    #[must_use]
    pub fn select(&self, columns: &str) -> SelectQuery {
        SelectQuery {
            table: self.clone(),
            params: vec![("select".to_owned(), columns.to_owned())],
        }
    }

    /// Insert one row and return it as stored by the platform.
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError`] on transport or API failure, or
    /// [`PlatformError::NotFound`] if the platform echoes nothing back.
    pub async fn insert_one<B, T>(&self, row: &B) -> Result<T, PlatformError>
    where
        B: Serialize + Sync,
        T: DeserializeOwned,
    {
        let request = self
            .client
            .request(Method::POST, &self.path(), self.key)?
            .header("Prefer", "return=representation")
            .json(row);

        let response = self.client.send(request).await?;
        let mut rows: Vec<T> = response.json().await?;
        rows.pop().ok_or_else(|| PlatformError::NotFound {
            table: self.name.clone(),
        })
    }

    /// Insert one or more rows without echoing them back.
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError`] on transport or API failure.
    pub async fn insert<B>(&self, rows: &B) -> Result<(), PlatformError>
    where
        B: Serialize + Sync,
    {
        let request = self
            .client
            .request(Method::POST, &self.path(), self.key)?
            .header("Prefer", "return=minimal")
            .json(rows);

        self.client.send(request).await?;
        Ok(())
    }

    /// Start an update carrying `patch` as the new column values.
    #[must_use]
    pub fn update<B: Serialize>(&self, patch: B) -> WriteQuery<B> {
        WriteQuery {
            table: self.clone(),
            method: Method::PATCH,
            patch: Some(patch),
            filters: Vec::new(),
        }
    }

    /// Start a delete.
    #[must_use]
    pub fn delete(&self) -> WriteQuery<()> {
        WriteQuery {
            table: self.clone(),
            method: Method::DELETE,
            patch: None,
            filters: Vec::new(),
        }
    }
}

/// A pending read against one table.
pub struct SelectQuery {
    table: Table,
    params: Vec<(String, String)>,
}

impl SelectQuery {
    /// Keep rows where `column` equals `value`.
    #[must_use]
    pub fn eq(mut self, column: &str, value: &str) -> Self {
        self.params.push((column.to_owned(), format!("eq.{value}")));
        self
    }

    /// Order the result by `column`.
    #[must_use]
    pub fn order(mut self, column: &str, direction: SortDirection) -> Self {
        self.params.push((
            "order".to_owned(),
            format!("{column}.{}", direction.suffix()),
        ));
        self
    }

    /// Cap the number of returned rows.
    #[must_use]
    pub fn limit(mut self, n: u32) -> Self {
        self.params.push(("limit".to_owned(), n.to_string()));
        self
    }

    /// Run the query and deserialize all rows.
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError`] on transport, API, or decode failure.
    pub async fn fetch<T: DeserializeOwned>(self) -> Result<Vec<T>, PlatformError> {
        let request = self
            .table
            .client
            .request(Method::GET, &self.table.path(), self.table.key)?
            .query(&self.params);

        let response = self.table.client.send(request).await?;
        Ok(response.json().await?)
    }

    /// Run the query expecting at most one row.
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError`] on transport, API, or decode failure.
    pub async fn maybe_single<T: DeserializeOwned>(self) -> Result<Option<T>, PlatformError> {
        let mut rows = self.limit(1).fetch::<T>().await?;
        Ok(rows.pop())
    }

    /// Run the query expecting exactly one row.
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError::NotFound`] if the query matched nothing.
    pub async fn single<T: DeserializeOwned>(self) -> Result<T, PlatformError> {
        let table = self.table.name.clone();
        self.maybe_single()
            .await?
            .ok_or(PlatformError::NotFound { table })
    }
}

/// A pending update or delete against one table.
pub struct WriteQuery<B> {
    table: Table,
    method: Method,
    patch: Option<B>,
    filters: Vec<(String, String)>,
}

impl<B: Serialize> WriteQuery<B> {
    /// Restrict the write to rows where `column` equals `value`.
    #[must_use]
    pub fn eq(mut self, column: &str, value: &str) -> Self {
        self.filters.push((column.to_owned(), format!("eq.{value}")));
        self
    }

    /// Execute the write.
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError`] on transport or API failure. Writes with
    /// no filter are refused by the platform, not here.
    pub async fn execute(self) -> Result<(), PlatformError> {
        let mut request = self
            .table
            .client
            .request(self.method, &self.table.path(), self.table.key)?
            .header("Prefer", "return=minimal")
            .query(&self.filters);

        if let Some(patch) = &self.patch {
            request = request.json(patch);
        }

        self.table.client.send(request).await?;
        Ok(())
    }
}
