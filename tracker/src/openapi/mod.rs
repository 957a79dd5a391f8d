//! OpenAPI documentation for the tracker API at `/api/tracker/*`.
//!
//! The document is served as JSON at `/api-docs/openapi.json` and rendered at `/docs`.

use crate::api;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Habit Tracker API",
        description = "Habits plus weekly and monthly completion tracking."
    ),
    servers(
        (url = "/api/tracker", description = "Tracker API")
    ),
    paths(
        api::handlers::habits::create_habit,
        api::handlers::habits::list_habits,
        api::handlers::habits::get_habit,
        api::handlers::habits::update_habit,
        api::handlers::habits::delete_habit,
        api::handlers::weekly::list_weekly_habits,
        api::handlers::weekly::get_done_days,
        api::handlers::weekly::toggle_weekly,
        api::handlers::monthly::list_monthly_habits,
        api::handlers::monthly::get_month_data,
        api::handlers::monthly::toggle_monthly,
    ),
    components(
        schemas(
            api::models::habits::HabitCreate,
            api::models::habits::HabitUpdate,
            api::models::habits::HabitResponse,
            api::models::tracking::WeeklyTrackResponse,
            api::models::tracking::WeeklyToggleResponse,
            api::models::tracking::MonthlyTrackResponse,
            api::models::tracking::MonthlyToggleResponse,
        )
    ),
    tags(
        (name = "habits", description = "Create, read, update and delete habits."),
        (name = "weekly", description = "Completion records keyed by calendar date."),
        (name = "monthly", description = "Completion records keyed by year, month and day."),
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_every_route() {
        let doc = ApiDoc::openapi();

        for path in ["/habit", "/habit/{habit_key}", "/weekly", "/weekly/{habit_key}", "/monthly", "/monthly/{habit_key}"] {
            assert!(doc.paths.paths.contains_key(path), "missing {path}");
        }
    }
}
