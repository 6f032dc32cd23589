use gardenic_core::markup::team_member_fragment;
use gardenic_core::model::TeamMember;

use super::{Section, SectionOutcome, SkipReason, TEAM_CONTAINER};
use crate::api::SiteApi;
use crate::page::Page;
use crate::widgets::Widgets;

/// The carousel starts only when there are more members than fit on one row
pub const CAROUSEL_THRESHOLD: usize = 3;

pub async fn init_team(
    api: &dyn SiteApi,
    page: &dyn Page,
    widgets: Option<&dyn Widgets>,
) -> SectionOutcome {
    if !page.exists(TEAM_CONTAINER) {
        return SectionOutcome::missing_container(Section::Team, TEAM_CONTAINER);
    }

    let members = api.fetch_team().await;
    if members.is_empty() {
        return SectionOutcome::skipped(Section::Team, SkipReason::NoData);
    }

    let rendered = render_team(page, widgets, &members);
    SectionOutcome::rendered(Section::Team, rendered)
}

pub fn render_team(page: &dyn Page, widgets: Option<&dyn Widgets>, members: &[TeamMember]) -> usize {
    let fragments: Vec<_> = members
        .iter()
        .filter(|member| member.is_active)
        .map(team_member_fragment)
        .collect();
    let count = fragments.len();

    page.replace_children(TEAM_CONTAINER, fragments);

    if count > CAROUSEL_THRESHOLD {
        if let Some(widgets) = widgets {
            widgets.start_carousel(TEAM_CONTAINER);
        }
    }

    count
}
