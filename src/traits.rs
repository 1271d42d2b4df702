//! The searchable-resource trait and the search orchestrator.
//!
//! Implementors declare which fields and one-hop relations are eligible for
//! filtering and sorting; the provided [`SearchableResource::search`] method
//! composes joins, the filter tree, sort, and pagination against a
//! Sea-ORM select and returns a paginated envelope.

use async_trait::async_trait;
use sea_orm::sea_query::{Alias, IntoIden};
use sea_orm::{
    DatabaseConnection, EntityTrait, JoinType, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, RelationDef,
};
use std::collections::HashSet;

use crate::errors::SearchError;
use crate::filter::conditions::{FieldContext, build_filter_condition};
use crate::filter::expression::FilterExpression;
use crate::filter::fields::join_alias;
use crate::filter::pagination::Pagination;
use crate::filter::sort::{Sort, resolve_sort};
use crate::models::{SearchMeta, SearchResponse};

/// A one-hop relation eligible for filtering and sorting, addressed by its
/// dot-free name in field paths (e.g. `trips.days`).
pub struct JoinedRelation {
    /// Relation segment as used in dotted field paths
    pub name: &'static str,
    /// Relation definition, typically `|| Relation::Variant.def()`
    pub def: fn() -> RelationDef,
}

/// A resource whose listing endpoint supports the search engine.
///
/// # Example
///
/// ```rust,ignore
/// #[async_trait]
/// impl SearchableResource for Travel {
///     type EntityType = Entity;
///
///     const ENTITY_NAME: &'static str = "travels";
///
///     fn allowed_fields() -> Vec<&'static str> {
///         vec!["id", "title", "country", "meta"]
///     }
///
///     fn joined_relations() -> Vec<JoinedRelation> {
///         vec![JoinedRelation { name: "details", def: || Relation::Details.def() }]
///     }
/// }
///
/// let response = Travel::search(&db, filter.as_ref(), &pagination, &sort).await?;
/// ```
#[async_trait]
pub trait SearchableResource: Sized + Send + Sync
where
    Self::EntityType: EntityTrait + Sync,
    <Self::EntityType as EntityTrait>::Model: Sync,
    Self: From<<Self::EntityType as EntityTrait>::Model>,
{
    type EntityType: EntityTrait;

    /// Root alias used to qualify columns; must match the entity's table name.
    const ENTITY_NAME: &'static str;

    /// Fallback sort field when the caller does not supply one.
    const DEFAULT_SORT_FIELD: &'static str = "id";

    /// Fields directly owned by the entity, eligible for filtering/sorting.
    fn allowed_fields() -> Vec<&'static str>;

    /// One-hop relations eligible for filtering/sorting.
    fn joined_relations() -> Vec<JoinedRelation> {
        Vec::new()
    }

    /// Execute a search and return one page of results plus metadata.
    ///
    /// Every declared relation is left-joined exactly once under the
    /// deterministic alias `{ENTITY_NAME}_{relation}`. The matching-row
    /// count reflects the filter but ignores pagination.
    ///
    /// # Errors
    ///
    /// Filter and sort validation failures surface as the corresponding
    /// [`SearchError`] variant before any query executes; execution-time
    /// failures propagate as [`SearchError::Database`].
    async fn search(
        db: &DatabaseConnection,
        filter: Option<&FilterExpression>,
        pagination: &Pagination,
        sort: &Sort,
    ) -> Result<SearchResponse<Self>, SearchError> {
        let relations = Self::joined_relations();
        let joined_fields: Vec<&'static str> = relations.iter().map(|rel| rel.name).collect();
        let allowed_fields = Self::allowed_fields();

        let mut query = Self::EntityType::find();
        let mut seen_aliases = HashSet::new();
        for relation in &relations {
            let alias = join_alias(Self::ENTITY_NAME, relation.name);
            if seen_aliases.insert(alias.clone()) {
                query = query.join_as(
                    JoinType::LeftJoin,
                    (relation.def)(),
                    Alias::new(&alias).into_iden(),
                );
            }
        }

        let ctx = FieldContext {
            entity: Self::ENTITY_NAME,
            allowed_fields: &allowed_fields,
            joined_fields: &joined_fields,
        };

        if let Some(filter) = filter {
            query = query.filter(build_filter_condition(filter, &ctx)?);
        }
        let plan = resolve_sort(sort, &ctx, Self::DEFAULT_SORT_FIELD)?;

        let total = query.clone().count(db).await?;

        if let Some((extraction, alias)) = plan.select {
            query = query.expr_as(extraction, alias.as_str());
        }
        query = query
            .order_by(plan.order_by, plan.order)
            .offset(pagination.offset())
            .limit(pagination.limit);

        tracing::debug!(
            entity = Self::ENTITY_NAME,
            total,
            page = pagination.page,
            limit = pagination.limit,
            "executing search query"
        );

        let models = query.all(db).await?;
        let contents: Vec<Self> = models.into_iter().map(Self::from).collect();

        Ok(SearchResponse {
            contents,
            meta: SearchMeta {
                total,
                page: pagination.page,
                limit: pagination.limit,
                total_pages: pagination.total_pages(total),
                sort_by: plan.field,
                sort_order: sort.sort_order,
            },
        })
    }
}
