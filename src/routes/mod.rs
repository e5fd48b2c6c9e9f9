mod accept_invite;
mod dashboard;
mod forgot_password;
mod home;
mod login;
mod not_found;
mod organization;
mod pricing;
mod register_organization;
mod reset_password;
mod select_type;
mod signup;
mod verify_otp;

pub(crate) use accept_invite::AcceptInvitePage;
pub(crate) use dashboard::DashboardPage;
pub(crate) use forgot_password::ForgotPasswordPage;
pub(crate) use home::HomePage;
pub(crate) use login::LoginPage;
pub(crate) use not_found::NotFoundPage;
pub(crate) use organization::{OrganizationDashboardPage, OrganizationMembersPage};
pub(crate) use pricing::PricingPage;
pub(crate) use register_organization::RegisterOrganizationPage;
pub(crate) use reset_password::ResetPasswordPage;
pub(crate) use select_type::SelectTypePage;
pub(crate) use signup::SignUpPage;
pub(crate) use verify_otp::VerifyOtpPage;

use leptos::prelude::*;
use leptos_router::components::{Route, Routes};
use leptos_router::path;

#[component]
pub fn AppRoutes() -> impl IntoView {
    view! {
        <Routes fallback=|| view! { <NotFoundPage /> }>
            <Route path=path!("/") view=HomePage />
            <Route path=path!("/login") view=LoginPage />
            <Route path=path!("/select-type") view=SelectTypePage />
            <Route path=path!("/signup") view=SignUpPage />
            <Route path=path!("/register-organization") view=RegisterOrganizationPage />
            <Route path=path!("/verify-otp") view=VerifyOtpPage />
            <Route path=path!("/forgot-password") view=ForgotPasswordPage />
            <Route path=path!("/reset-password") view=ResetPasswordPage />
            <Route path=path!("/dashboard") view=DashboardPage />
            <Route path=path!("/organization/dashboard") view=OrganizationDashboardPage />
            <Route path=path!("/organization/members") view=OrganizationMembersPage />
            <Route path=path!("/accept-invite/:token") view=AcceptInvitePage />
            <Route path=path!("/pricing") view=PricingPage />
            <Route path=path!("/*any") view=NotFoundPage />
        </Routes>
    }
}
