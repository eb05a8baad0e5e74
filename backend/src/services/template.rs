//! Template catalog service
//!
//! Official templates are owned by nobody and editable by admins only;
//! personal templates belong to exactly one user.

use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::repositories::{
    CreateTemplate, TemplateFilter, TemplateRecord, TemplateRepository, UpdateTemplate,
};
use fitplan_shared::plan::validate_schedule;
use fitplan_shared::types::{
    normalize_paging, CreateTemplateRequest, CreatedResponse, PageQuery, TemplateListQuery,
    TemplatePage, TemplateResponse, UpdateTemplateRequest,
};
use sqlx::PgPool;
use tracing::{info, warn};
use uuid::Uuid;

pub const OFFICIAL_AUTHOR: &str = "FitPlan Official";
pub const PERSONAL_AUTHOR: &str = "Personal";
pub const COPY_PREFIX: &str = "Copy of: ";
const DEFAULT_PAGE_SIZE: i64 = 20;

/// Template service for business logic
pub struct TemplateService;

impl TemplateService {
    /// Get a template by id
    pub async fn get(pool: &PgPool, id: Uuid) -> Result<TemplateResponse, ApiError> {
        let record = Self::fetch(pool, id).await?;
        Ok(to_response(record))
    }

    /// Filtered page of the official catalog
    pub async fn list(pool: &PgPool, query: TemplateListQuery) -> Result<TemplatePage, ApiError> {
        let (page, page_size, offset) =
            normalize_paging(query.page, query.page_size, DEFAULT_PAGE_SIZE);

        let filter = TemplateFilter {
            goal: query.goal.filter(|s| !s.is_empty()),
            level: query.level.filter(|s| !s.is_empty()),
            split_type: query.split_type.filter(|s| !s.is_empty()),
            equipment: query.equipment.filter(|s| !s.is_empty()),
            duration_weeks_min: query.duration_weeks_min.filter(|w| *w > 0),
            duration_weeks_max: query.duration_weeks_max.filter(|w| *w > 0),
        };

        let (records, total) = TemplateRepository::list_catalog(pool, &filter, page_size, offset)
            .await
            .map_err(ApiError::Internal)?;

        Ok(TemplatePage {
            total,
            page,
            page_size,
            templates: records.into_iter().map(to_response).collect(),
        })
    }

    /// The caller's personal templates
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: Uuid,
        query: PageQuery,
    ) -> Result<TemplatePage, ApiError> {
        let (page, page_size, offset) =
            normalize_paging(query.page, query.page_size, DEFAULT_PAGE_SIZE);

        let (records, total) = TemplateRepository::list_by_user(pool, user_id, page_size, offset)
            .await
            .map_err(ApiError::Internal)?;

        Ok(TemplatePage {
            total,
            page,
            page_size,
            templates: records.into_iter().map(to_response).collect(),
        })
    }

    /// Create an official template (admin route)
    pub async fn create_official(
        pool: &PgPool,
        admin_id: Uuid,
        req: CreateTemplateRequest,
    ) -> Result<CreatedResponse, ApiError> {
        validate_schedule(req.duration_weeks, req.training_days_per_week, &req.training_days)?;

        let author = req
            .author
            .clone()
            .filter(|a| !a.trim().is_empty())
            .unwrap_or_else(|| OFFICIAL_AUTHOR.to_string());
        let record = TemplateRepository::create(pool, new_template(req, None, author, true))
            .await
            .map_err(ApiError::Internal)?;

        info!(template_id = %record.id, admin_id = %admin_id, "Official template created");
        Ok(CreatedResponse {
            id: record.id.to_string(),
        })
    }

    /// Create a personal template
    pub async fn create_custom(
        pool: &PgPool,
        user_id: Uuid,
        req: CreateTemplateRequest,
    ) -> Result<CreatedResponse, ApiError> {
        validate_schedule(req.duration_weeks, req.training_days_per_week, &req.training_days)?;

        let input = new_template(req, Some(user_id), PERSONAL_AUTHOR.to_string(), false);
        let record = TemplateRepository::create(pool, input)
            .await
            .map_err(ApiError::Internal)?;

        info!(template_id = %record.id, user_id = %user_id, "Personal template created");
        Ok(CreatedResponse {
            id: record.id.to_string(),
        })
    }

    /// Copy any visible template into the caller's personal templates
    pub async fn duplicate(
        pool: &PgPool,
        user_id: Uuid,
        template_id: Uuid,
    ) -> Result<CreatedResponse, ApiError> {
        let source = Self::fetch(pool, template_id).await?;
        let record = TemplateRepository::create(pool, duplicate_of(source, user_id))
            .await
            .map_err(ApiError::Internal)?;

        info!(
            template_id = %record.id,
            source_id = %template_id,
            user_id = %user_id,
            "Template duplicated"
        );
        Ok(CreatedResponse {
            id: record.id.to_string(),
        })
    }

    /// Apply the supplied fields
    pub async fn update(
        pool: &PgPool,
        caller: &AuthUser,
        template_id: Uuid,
        req: UpdateTemplateRequest,
    ) -> Result<TemplateResponse, ApiError> {
        let current = Self::fetch(pool, template_id).await?;
        ensure_editable(&current, caller)?;

        let weeks = req.duration_weeks.unwrap_or(current.duration_weeks);
        let per_week = req
            .training_days_per_week
            .unwrap_or(current.training_days_per_week);
        let days = req
            .training_days
            .as_deref()
            .unwrap_or(current.training_days.0.as_slice());
        validate_schedule(weeks, per_week, days)?;

        let input = UpdateTemplate {
            name: req.name,
            description: req.description,
            goal: req.goal,
            split_type: req.split_type,
            level: req.level,
            equipment: req.equipment,
            duration_weeks: req.duration_weeks,
            training_days_per_week: req.training_days_per_week,
            training_days: req.training_days,
            tags: req.tags,
            image_url: req.image_url,
            recommended_intensity: req.recommended_intensity,
        };

        let record = TemplateRepository::update(pool, template_id, input)
            .await
            .map_err(ApiError::Internal)?
            .ok_or_else(|| ApiError::NotFound("Template not found".to_string()))?;

        info!(template_id = %template_id, user_id = %caller.user_id, "Template updated");
        Ok(to_response(record))
    }

    pub async fn delete(pool: &PgPool, caller: &AuthUser, template_id: Uuid) -> Result<(), ApiError> {
        let current = Self::fetch(pool, template_id).await?;
        ensure_editable(&current, caller)?;

        let deleted = TemplateRepository::delete(pool, template_id)
            .await
            .map_err(ApiError::Internal)?;
        if !deleted {
            return Err(ApiError::NotFound("Template not found".to_string()));
        }

        info!(template_id = %template_id, user_id = %caller.user_id, "Template deleted");
        Ok(())
    }

    async fn fetch(pool: &PgPool, id: Uuid) -> Result<TemplateRecord, ApiError> {
        TemplateRepository::find_by_id(pool, id)
            .await
            .map_err(ApiError::Internal)?
            .ok_or_else(|| ApiError::NotFound("Template not found".to_string()))
    }
}

/// Owners may edit their personal templates; only admins touch official ones
fn ensure_editable(template: &TemplateRecord, caller: &AuthUser) -> Result<(), ApiError> {
    let allowed = if template.is_official {
        caller.is_admin()
    } else {
        template.user_id == Some(caller.user_id)
    };

    if !allowed {
        warn!(
            template_id = %template.id,
            user_id = %caller.user_id,
            official = template.is_official,
            "Template edit rejected"
        );
        return Err(ApiError::Forbidden(
            "No permission to modify this template".to_string(),
        ));
    }
    Ok(())
}

fn new_template(
    req: CreateTemplateRequest,
    user_id: Option<Uuid>,
    author: String,
    is_official: bool,
) -> CreateTemplate {
    CreateTemplate {
        user_id,
        name: req.name,
        description: req.description,
        goal: req.goal,
        split_type: req.split_type,
        level: req.level,
        equipment: req.equipment,
        duration_weeks: req.duration_weeks,
        training_days_per_week: req.training_days_per_week,
        training_days: req.training_days,
        image_url: req.image_url,
        author,
        tags: req.tags,
        recommended_intensity: req.recommended_intensity,
        is_official,
    }
}

/// Deep copy owned by `user_id`; the source record is consumed, not shared
fn duplicate_of(source: TemplateRecord, user_id: Uuid) -> CreateTemplate {
    CreateTemplate {
        user_id: Some(user_id),
        name: format!("{}{}", COPY_PREFIX, source.name),
        description: source.description,
        goal: source.goal,
        split_type: source.split_type,
        level: source.level,
        equipment: source.equipment,
        duration_weeks: source.duration_weeks,
        training_days_per_week: source.training_days_per_week,
        training_days: source.training_days.0,
        image_url: source.image_url,
        author: PERSONAL_AUTHOR.to_string(),
        tags: source.tags.0,
        recommended_intensity: source.recommended_intensity,
        is_official: false,
    }
}

fn to_response(record: TemplateRecord) -> TemplateResponse {
    TemplateResponse {
        id: record.id.to_string(),
        user_id: record.user_id.map(|id| id.to_string()),
        name: record.name,
        description: record.description,
        goal: record.goal,
        split_type: record.split_type,
        level: record.level,
        equipment: record.equipment,
        duration_weeks: record.duration_weeks,
        training_days_per_week: record.training_days_per_week,
        training_days: record.training_days.0,
        image_url: record.image_url,
        author: record.author,
        tags: record.tags.0,
        recommended_intensity: record.recommended_intensity,
        is_official: record.is_official,
        created_at: record.created_at,
        updated_at: record.updated_at,
    }
}
