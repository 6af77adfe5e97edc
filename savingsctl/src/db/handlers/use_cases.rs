//! Use case directory.
//!
//! Two sources back the directory. The canonical `automation_use_cases` table has a known layout.
//! The savings configuration table, when present, is preferred: it is what operators actually
//! maintain, but its columns vary between deployments, so they are detected per request. Any
//! failure on the adaptive path falls back to the canonical table.

use tracing::{debug, instrument, warn};

use crate::{
    db::{
        Database,
        errors::{DbError, MaybeTable, OrMissing, Result},
        executor::Row,
        handlers::schema::ColumnInfo,
        mapping::{column_index, pick_first},
        models::{
            savings::normalize_name,
            use_cases::{UseCaseOverview, UseCaseRef},
        },
        sql::{SqlBuilder, Statement, contains_pattern, quote_ident},
    },
    types::UseCaseStatus,
};

pub const DEFAULT_LIMIT: i64 = 24;
pub const MAX_LIMIT: i64 = 200;

const ID_CANDIDATES: &[&str] = &["id", "usecase_id", "uc_id", "uuid"];
const NAME_CANDIDATES: &[&str] = &["name", "usecase", "use_case", "usecase_name", "use_case_name", "title"];
const DESCRIPTION_CANDIDATES: &[&str] = &["description", "desc", "details", "summary"];
const OWNER_CANDIDATES: &[&str] = &["owner", "owner_name", "team", "group", "squad"];
const STATUS_CANDIDATES: &[&str] = &["status", "state", "lifecycle_status", "prod_status"];
const CREATED_CANDIDATES: &[&str] = &[
    "created_at",
    "createdon",
    "created_on",
    "created_ts",
    "createddate",
    "created_date",
    "created_time",
    "createdtime",
];
const LIVE_CANDIDATES: &[&str] = &["is_live", "live", "is_active", "active"];
const ENVIRONMENT_CANDIDATES: &[&str] = &["environment", "env", "stage", "deployment_env"];

const OVERVIEW_NAME_CANDIDATES: &[&str] = &["name", "usecase_name", "use_case_name", "usecase", "use_case", "title"];
const STAKEHOLDER_CANDIDATES: &[&str] = &[
    "stakeholder",
    "owner",
    "owner_name",
    "business_owner",
    "product_owner",
    "team",
    "group",
    "squad",
];
const OVERVIEW_DESCRIPTION_CANDIDATES: &[&str] = &[
    "process_summary",
    "process",
    "short_desc",
    "short_description",
    "description",
    "desc",
    "details",
    "summary",
];
const HLD_CANDIDATES: &[&str] = &[
    "hld",
    "hld_link",
    "hldurl",
    "hld_url",
    "confluence",
    "confluence_link",
    "confluence_url",
    "doc",
    "doc_link",
    "documentation",
    "wiki",
    "wiki_link",
];

/// Filter for listing use cases
#[derive(Debug, Clone)]
pub struct UseCaseFilter {
    /// Case-insensitive substring match on name or description
    pub search: Option<String>,
    pub status: Option<UseCaseStatus>,
    /// Only list use cases the adaptive source marks as live in production
    pub live_only: bool,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl Default for UseCaseFilter {
    fn default() -> Self {
        Self {
            search: None,
            status: None,
            live_only: true,
            limit: None,
            offset: None,
        }
    }
}

impl UseCaseFilter {
    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT)
    }

    pub fn offset(&self) -> i64 {
        self.offset.unwrap_or(0).max(0)
    }
}

/// Physical columns of an adaptive directory table
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirectoryColumns {
    pub id: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub owner: Option<String>,
    pub status: Option<String>,
    pub created: Option<String>,
    /// Boolean live flag; only used when the column really is boolean
    pub live: Option<String>,
    pub environment: Option<String>,
}

impl DirectoryColumns {
    pub fn resolve(columns: &[ColumnInfo]) -> Self {
        let available = column_index(columns);
        let boolean = column_index(columns.iter().filter(|c| c.data_type == "boolean"));

        Self {
            id: pick_first(&available, ID_CANDIDATES),
            name: pick_first(&available, NAME_CANDIDATES),
            description: pick_first(&available, DESCRIPTION_CANDIDATES),
            owner: pick_first(&available, OWNER_CANDIDATES),
            status: pick_first(&available, STATUS_CANDIDATES),
            created: pick_first(&available, CREATED_CANDIDATES),
            live: pick_first(&boolean, LIVE_CANDIDATES),
            environment: pick_first(&available, ENVIRONMENT_CANDIDATES),
        }
    }

    /// Derived `ACTIVE`/`DRAFT`/`DEPRECATED` expression
    fn status_expr(&self) -> String {
        if let Some(live) = &self.live {
            return format!("CASE WHEN {} = true THEN 'ACTIVE' ELSE 'DRAFT' END", quote_ident(live));
        }
        match &self.status {
            Some(status) => {
                let s = quote_ident(status);
                format!(
                    "CASE WHEN {s} ILIKE 'deprec%' THEN 'DEPRECATED' WHEN {s} ILIKE 'draft%' THEN 'DRAFT' \
                     WHEN {s} ILIKE 'inactive%' THEN 'DRAFT' ELSE 'ACTIVE' END"
                )
            }
            None => "'ACTIVE'".to_string(),
        }
    }

    /// Predicate selecting use cases live in production, if any column can tell
    fn live_predicate(&self) -> Option<String> {
        if let Some(live) = &self.live {
            return Some(format!("{} = true", quote_ident(live)));
        }
        if let Some(status) = &self.status {
            let s = quote_ident(status);
            return Some(format!(
                "({s} ILIKE 'live' OR {s} ILIKE 'prod%' OR {s} ILIKE 'production%' OR {s} ILIKE 'active%')"
            ));
        }
        self.environment.as_ref().map(|env| {
            let e = quote_ident(env);
            format!("({e} ILIKE 'prod%' OR {e} ILIKE 'production%')")
        })
    }
}

fn text_or_null(column: Option<&String>, alias: &str) -> String {
    match column {
        Some(column) => format!("CAST({} AS TEXT) AS {alias}", quote_ident(column)),
        None => format!("NULL::TEXT AS {alias}"),
    }
}

/// Directory query over an adaptive table. The name column must be mapped.
pub fn adaptive_statement(table: &str, table_ref: &str, columns: &DirectoryColumns, filter: &UseCaseFilter) -> Result<Statement> {
    let name = columns.name.as_deref().map(quote_ident).ok_or_else(|| DbError::Mapping {
        table: table.to_string(),
        role: "name".to_string(),
    })?;

    let id = match &columns.id {
        Some(id) => format!("CAST({} AS TEXT) AS id", quote_ident(id)),
        None => format!("md5(CAST({name} AS TEXT)) AS id"),
    };
    let created = match &columns.created {
        Some(created) => format!("CAST({} AS TEXT) AS created_at", quote_ident(created)),
        None => "now()::TEXT AS created_at".to_string(),
    };

    let mut query = SqlBuilder::new(format!(
        "SELECT * FROM (SELECT {id}, CAST({name} AS TEXT) AS name, {}, {}, {} AS status, {created}, NULL::TEXT AS updated_at \
         FROM {table_ref} WHERE 1=1",
        text_or_null(columns.description.as_ref(), "description"),
        text_or_null(columns.owner.as_ref(), "owner"),
        columns.status_expr(),
    ));

    if filter.live_only {
        if let Some(predicate) = columns.live_predicate() {
            query.push(" AND ").push(predicate);
        }
    }

    if let Some(pattern) = contains_pattern(filter.search.as_deref()) {
        let description = match &columns.description {
            Some(description) => format!("CAST({} AS TEXT)", quote_ident(description)),
            None => "''".to_string(),
        };
        query
            .push(format!(" AND (CAST({name} AS TEXT) ILIKE "))
            .push_bind(pattern.clone())
            .push(format!(" OR {description} ILIKE "))
            .push_bind(pattern)
            .push(")");
    }

    query.push(") AS directory WHERE 1=1");
    if let Some(status) = filter.status {
        query.push(" AND status = ").push_bind(status.as_str());
    }

    query
        .push(" ORDER BY name ASC LIMIT ")
        .push_bind(filter.limit())
        .push(" OFFSET ")
        .push_bind(filter.offset());
    Ok(query.build())
}

pub struct UseCases<'a> {
    db: &'a Database,
}

impl<'a> UseCases<'a> {
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// List use cases, preferring the savings table when it is available
    #[instrument(skip(self), err)]
    pub async fn list(&self, filter: &UseCaseFilter) -> Result<Vec<UseCaseRef>> {
        let settings = self.db.settings();
        let prefer_adaptive =
            settings.prefers_savings_directory() || self.db.prober().table_exists(&settings.savings_table).await?;

        if prefer_adaptive {
            match self.list_adaptive(filter).await {
                Ok(use_cases) => return Ok(use_cases),
                Err(e) => warn!(
                    attempted_table = %settings.savings_table,
                    fallback_table = %settings.use_case_table,
                    error = %e,
                    "Adaptive use case directory failed, falling back"
                ),
            }
        }

        Ok(self.list_canonical(filter).await?.unwrap_or_default())
    }

    #[instrument(skip(self), err)]
    async fn list_adaptive(&self, filter: &UseCaseFilter) -> Result<Vec<UseCaseRef>> {
        let table = &self.db.settings().savings_table;
        let columns = self.db.prober().columns(table).await?;
        if columns.is_empty() {
            return Err(DbError::MissingRelation {
                message: format!("{table} not found in schema"),
            });
        }

        let directory = DirectoryColumns::resolve(&columns);
        debug!(table, ?directory, "Resolved directory columns");

        let statement = adaptive_statement(table, &self.db.table_ref(table), &directory, filter)?;
        let rows = self.db.executor().fetch_all(&statement).await?;
        Ok(rows.iter().map(use_case_from_row).collect())
    }

    #[instrument(skip(self), err)]
    async fn list_canonical(&self, filter: &UseCaseFilter) -> Result<MaybeTable<Vec<UseCaseRef>>> {
        let table = &self.db.settings().use_case_table;
        let mut query = SqlBuilder::new(
            "SELECT CAST(id AS TEXT) AS id, CAST(name AS TEXT) AS name, CAST(description AS TEXT) AS description, \
             CAST(owner AS TEXT) AS owner, CAST(status AS TEXT) AS status, created_at, updated_at FROM ",
        );
        query.push(self.db.table_ref(table)).push(" WHERE 1=1");

        if let Some(pattern) = contains_pattern(filter.search.as_deref()) {
            query
                .push(" AND (name ILIKE ")
                .push_bind(pattern.clone())
                .push(" OR description ILIKE ")
                .push_bind(pattern)
                .push(")");
        }
        if let Some(status) = filter.status {
            query.push(" AND status = ").push_bind(status.as_str());
        }

        query
            .push(" ORDER BY created_at DESC LIMIT ")
            .push_bind(filter.limit())
            .push(" OFFSET ")
            .push_bind(filter.offset());

        let rows = self.db.executor().fetch_all(&query.build()).await.or_missing()?;
        if rows.is_missing() {
            debug!(table, "Canonical use case table absent");
        }
        Ok(rows.map(|rows| rows.iter().map(use_case_from_row).collect()))
    }

    /// Stakeholder, description and design-document link for one use case.
    ///
    /// The savings table is searched first with detected columns, then the canonical table.
    #[instrument(skip(self), err)]
    pub async fn overview_by_name(&self, name: &str) -> Result<Option<UseCaseOverview>> {
        let key = normalize_name(name);
        if key.is_empty() {
            return Ok(None);
        }

        let settings = self.db.settings();
        if self.db.prober().table_exists(&settings.savings_table).await? {
            match self.overview_adaptive(&key).await {
                Ok(Some(overview)) => return Ok(Some(overview)),
                Ok(None) => {}
                Err(e) => warn!(table = %settings.savings_table, use_case = %key, error = %e, "Overview lookup failed"),
            }
        }

        if !self.db.prober().table_exists(&settings.use_case_table).await? {
            return Ok(None);
        }

        let mut query = SqlBuilder::new(
            "SELECT CAST(name AS TEXT) AS name, CAST(owner AS TEXT) AS stakeholder, \
             CAST(description AS TEXT) AS description, NULL::TEXT AS hld_url FROM ",
        );
        query
            .push(self.db.table_ref(&settings.use_case_table))
            .push(" WHERE LOWER(TRIM(CAST(name AS TEXT))) = ")
            .push_bind(key)
            .push(" LIMIT 1");

        let rows = self.db.executor().fetch_all(&query.build()).await.or_missing()?;
        Ok(rows.present().and_then(|rows| rows.first().map(overview_from_row)))
    }

    async fn overview_adaptive(&self, key: &str) -> Result<Option<UseCaseOverview>> {
        let table = &self.db.settings().savings_table;
        let columns = self.db.prober().columns(table).await?;
        let available = column_index(&columns);

        let Some(name) = pick_first(&available, OVERVIEW_NAME_CANDIDATES) else {
            return Ok(None);
        };
        let stakeholder = pick_first(&available, STAKEHOLDER_CANDIDATES);
        let description = pick_first(&available, OVERVIEW_DESCRIPTION_CANDIDATES);
        let hld = pick_first(&available, HLD_CANDIDATES);

        let mut query = SqlBuilder::new(format!(
            "SELECT CAST({name} AS TEXT) AS name, {}, {}, {} FROM {} WHERE LOWER(TRIM(CAST({name} AS TEXT))) = ",
            text_or_null(stakeholder.as_ref(), "stakeholder"),
            text_or_null(description.as_ref(), "description"),
            text_or_null(hld.as_ref(), "hld_url"),
            self.db.table_ref(table),
            name = quote_ident(&name),
        ));
        query.push_bind(key).push(" LIMIT 1");

        let rows = self.db.executor().fetch_all(&query.build()).await?;
        Ok(rows.first().map(overview_from_row))
    }
}

fn use_case_from_row(row: &Row) -> UseCaseRef {
    UseCaseRef {
        id: row.text("id").unwrap_or_default(),
        name: row.text("name").unwrap_or_default(),
        description: row.text("description"),
        owner: row.text("owner"),
        status: UseCaseStatus::from_db(row.text("status").as_deref()),
        created_at: row.text("created_at").unwrap_or_default(),
        updated_at: row.text("updated_at"),
    }
}

fn overview_from_row(row: &Row) -> UseCaseOverview {
    UseCaseOverview {
        name: row.text("name").unwrap_or_default(),
        stakeholder: row.text("stakeholder"),
        description: row.text("description"),
        hld_url: row.text("hld_url"),
    }
}
