//! Public read API: published content projected into the viewer's
//! language, falling back to Greek and then to any stored translation.
//!
//! Missing or unpublished content is a plain 404.

use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;
use studio_core::translation::{resolve_or_default, Localized};
use studio_core::types::DbId;
use studio_db::models::film::{Film, FilmTranslation, FilmWithTranslations};
use studio_db::models::home::{HomePage, HomePageTranslation};
use studio_db::models::media::MediaAsset;
use studio_db::models::mission::{MissionStatement, MissionTranslation, MissionWithTranslations};
use studio_db::models::press::{PressItem, PressItemTranslation, PressItemWithTranslations};
use studio_db::repositories::{
    FilmRepo, HomePageRepo, MediaAssetRepo, MissionRepo, PressRepo, SiteSettingsRepo,
};

use crate::error::{AppError, AppResult};
use crate::query::LangParams;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Projections
// ---------------------------------------------------------------------------

/// An entity merged with the one translation chosen for the request.
#[derive(Debug, Serialize)]
pub struct Projected<E: Serialize, T: Serialize> {
    #[serde(flatten)]
    pub entity: E,
    #[serde(flatten)]
    pub text: T,
}

fn project<E, T>(entity: E, rows: &[T], lang: &str) -> Projected<E, T>
where
    E: Serialize,
    T: Serialize + Localized + Clone + Default,
{
    Projected {
        entity,
        text: resolve_or_default(rows, lang),
    }
}

pub type PublicFilm = Projected<Film, FilmTranslation>;
pub type PublicPressItem = Projected<PressItem, PressItemTranslation>;
pub type PublicMission = Projected<MissionStatement, MissionTranslation>;

fn film_view(row: FilmWithTranslations, lang: &str) -> PublicFilm {
    project(row.film, &row.translations, lang)
}

fn press_view(row: PressItemWithTranslations, lang: &str) -> PublicPressItem {
    project(row.item, &row.translations, lang)
}

fn mission_view(row: MissionWithTranslations, lang: &str) -> PublicMission {
    project(row.mission, &row.translations, lang)
}

/// Film page: the film, its ordered gallery, hero video and the published
/// press coverage linked to it.
#[derive(Debug, Serialize)]
pub struct PublicFilmDetail {
    #[serde(flatten)]
    pub film: PublicFilm,
    pub gallery: Vec<MediaAsset>,
    pub hero_video: Option<MediaAsset>,
    pub press: Vec<PublicPressItem>,
}

#[derive(Debug, Serialize)]
pub struct PublicHome {
    #[serde(flatten)]
    pub page: Projected<HomePage, HomePageTranslation>,
    pub svg_mask: Option<MediaAsset>,
    pub video: Option<MediaAsset>,
    pub featured_films: Vec<PublicFilm>,
    pub featured_press: Vec<PublicPressItem>,
}

async fn optional_asset(state: &AppState, id: Option<DbId>) -> AppResult<Option<MediaAsset>> {
    match id {
        Some(id) => Ok(MediaAssetRepo::find_by_id(&state.pool, id).await?),
        None => Ok(None),
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/public/films?lang=
pub async fn list_films(
    State(state): State<AppState>,
    Query(params): Query<LangParams>,
) -> AppResult<impl IntoResponse> {
    let lang = params.lang();
    let films: Vec<PublicFilm> = FilmRepo::list_published(&state.pool)
        .await?
        .into_iter()
        .map(|row| film_view(row, lang))
        .collect();
    Ok(Json(DataResponse { data: films }))
}

/// GET /api/v1/public/films/{slug}?lang=
pub async fn get_film(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Query(params): Query<LangParams>,
) -> AppResult<impl IntoResponse> {
    let lang = params.lang();
    let detail = FilmRepo::find_published_by_slug(&state.pool, &slug)
        .await?
        .ok_or_else(|| AppError::Database(sqlx::Error::RowNotFound))?;

    let press = PressRepo::list_published_for_film(&state.pool, detail.film.id)
        .await?
        .into_iter()
        .map(|row| press_view(row, lang))
        .collect();

    Ok(Json(DataResponse {
        data: PublicFilmDetail {
            film: project(detail.film, &detail.translations, lang),
            gallery: detail.gallery,
            hero_video: detail.hero_video,
            press,
        },
    }))
}

/// GET /api/v1/public/press?lang=
pub async fn list_press(
    State(state): State<AppState>,
    Query(params): Query<LangParams>,
) -> AppResult<impl IntoResponse> {
    let lang = params.lang();
    let items: Vec<PublicPressItem> = PressRepo::list_published(&state.pool)
        .await?
        .into_iter()
        .map(|row| press_view(row, lang))
        .collect();
    Ok(Json(DataResponse { data: items }))
}

/// GET /api/v1/public/missions?lang=
pub async fn list_missions(
    State(state): State<AppState>,
    Query(params): Query<LangParams>,
) -> AppResult<impl IntoResponse> {
    let lang = params.lang();
    let missions: Vec<PublicMission> = MissionRepo::list_published(&state.pool)
        .await?
        .into_iter()
        .map(|row| mission_view(row, lang))
        .collect();
    Ok(Json(DataResponse { data: missions }))
}

/// GET /api/v1/public/home?lang=
///
/// Featured items keep their configured order; unpublished ones are left
/// out.
pub async fn get_home(
    State(state): State<AppState>,
    Query(params): Query<LangParams>,
) -> AppResult<impl IntoResponse> {
    let lang = params.lang();
    let home = HomePageRepo::detail(&state.pool).await?;

    let featured_films = FilmRepo::list_published_by_ids(&state.pool, &home.featured_film_ids)
        .await?
        .into_iter()
        .map(|row| film_view(row, lang))
        .collect();
    let featured_press = PressRepo::list_published_by_ids(&state.pool, &home.featured_press_ids)
        .await?
        .into_iter()
        .map(|row| press_view(row, lang))
        .collect();
    let svg_mask = optional_asset(&state, home.page.svg_mask_id).await?;
    let video = optional_asset(&state, home.page.video_id).await?;

    Ok(Json(DataResponse {
        data: PublicHome {
            page: project(home.page, &home.translations, lang),
            svg_mask,
            video,
            featured_films,
            featured_press,
        },
    }))
}

/// GET /api/v1/public/settings
pub async fn get_settings(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let settings = SiteSettingsRepo::get_or_create(&state.pool).await?;
    Ok(Json(DataResponse { data: settings }))
}
