use actix_session::Session;
use actix_web::{web, HttpResponse};

use crate::errors::{AppError, render};
use crate::feed::FeedSource;
use crate::handlers::see_other;
use crate::session::{self, cookie};
use crate::stack::StackState;
use crate::state::AppState;
use crate::templates_structs::{CardView, DashboardTemplate, PageContext, ReviewView, TodoView};

/// GET /dashboard
pub async fn index(
    state: web::Data<AppState>,
    session: Session,
) -> Result<HttpResponse, AppError> {
    let Some(feed) = cookie::get_session_id(&session).and_then(|id| session::snapshot(&state.store, &id)) else {
        return Ok(see_other("/"));
    };
    let (Some(stack), Some(attrs)) = (feed.stack.as_ref(), feed.attributes.as_ref()) else {
        return Ok(see_other("/questionnaire"));
    };

    let stack_state = stack.state();
    let tmpl = DashboardTemplate {
        ctx: PageContext::build(&session, &feed.email),
        explanation: attrs.match_explanation(),
        live_data: feed.source == FeedSource::Remote,
        current: stack.current().map(CardView::from),
        show_summary: stack_state == StackState::Summary,
        is_empty: stack_state == StackState::Empty,
        finished: stack.is_finished(),
        settled: stack.settled(),
        total: stack.total(),
        remaining: stack.queue_len(),
        reviewed: stack.reviewed().iter().map(ReviewView::from).collect(),
        todos: feed.todos.items().iter().map(TodoView::from).collect(),
        pending_todos: feed.todos.pending_count(),
    };
    render(tmpl)
}
