use crate::features::auth::session::use_auth;
use leptos::prelude::*;
use leptos_router::hooks::{use_location, use_navigate};

#[component]
pub fn RequireAuth(children: Children) -> impl IntoView {
    let auth = use_auth();
    let navigate = use_navigate();
    let location = use_location();

    Effect::new(move |_| {
        if !auth.is_authenticated.get() {
            // UX-only guard; real access control must live on the API.
            let return_to = location.pathname.get_untracked();
            navigate(
                &format!("/login?redirect={return_to}"),
                Default::default(),
            );
        }
    });

    view! { {children()} }
}
