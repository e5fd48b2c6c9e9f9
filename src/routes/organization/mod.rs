mod dashboard;
mod members;

pub(crate) use dashboard::OrganizationDashboardPage;
pub(crate) use members::OrganizationMembersPage;
