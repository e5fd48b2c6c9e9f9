use crate::components::AppShell;
use leptos::prelude::*;
use leptos_router::components::A;

/// Account-type chooser shown before signup: personal use or a team
/// workspace.
#[component]
pub fn SelectTypePage() -> impl IntoView {
    view! {
        <AppShell>
            <div class="max-w-2xl mx-auto text-center">
                <h1 class="text-2xl font-semibold text-gray-900 dark:text-white">
                    "Choose account type"
                </h1>
                <p class="mt-2 text-sm text-gray-500 dark:text-gray-400">
                    "Select how you want to use Card CRM."
                </p>
                <div class="mt-8 grid gap-6 md:grid-cols-2">
                    <A
                        href="/signup"
                        {..}
                        class="block rounded-xl border-2 border-gray-200 bg-white p-6 text-left hover:border-blue-500 dark:border-gray-700 dark:bg-gray-800"
                    >
                        <h2 class="text-lg font-semibold text-gray-900 dark:text-white">
                            "Individual"
                        </h2>
                        <p class="mt-2 text-sm text-gray-500 dark:text-gray-400">
                            "For personal use. Scan cards, manage contacts, and organize your network."
                        </p>
                    </A>
                    <A
                        href="/register-organization"
                        {..}
                        class="block rounded-xl border-2 border-gray-200 bg-white p-6 text-left hover:border-blue-500 dark:border-gray-700 dark:bg-gray-800"
                    >
                        <h2 class="text-lg font-semibold text-gray-900 dark:text-white">
                            "Organization"
                        </h2>
                        <p class="mt-2 text-sm text-gray-500 dark:text-gray-400">
                            "For teams and businesses. Manage members, share contacts, and centralize data."
                        </p>
                    </A>
                </div>
            </div>
        </AppShell>
    }
}
