use catalog_runtime::{CatalogConfig, CatalogProvider, CatalogServices};
use leptos::*;
use leptos_meta::*;
use leptos_router::*;

use crate::{
    components::{ProtectedRoute, ToastContainer},
    pages::{HomePage, LoginPage, MyListPage, ProfilePage, RegisterPage, TrendingPage, WatchPage},
};

#[component]
pub fn SiteApp() -> impl IntoView {
    provide_meta_context();

    let host = platform_host_web::build_host_services();
    let services = match CatalogServices::with_http_apis(host, CatalogConfig::embedded()) {
        Ok(services) => services,
        Err(err) => {
            logging::error!("catalog services unavailable: {err}");
            return view! {
                <main class="site-root">
                    <p class="fatal-error">{format!("Zenithflix could not start: {err}")}</p>
                </main>
            }
            .into_view();
        }
    };

    view! {
        <Title text="Zenithflix" />
        <Meta name="description" content="Stream movies and series, track what you watch." />

        <CatalogProvider services=services>
            <Router>
                <main class="site-root">
                    <Routes>
                        <Route path="/login" view=LoginPage />
                        <Route path="/register" view=RegisterPage />
                        <Route
                            path=""
                            view=|| view! { <ProtectedRoute><HomePage /></ProtectedRoute> }
                        />
                        <Route
                            path="/trending"
                            view=|| view! { <ProtectedRoute><TrendingPage /></ProtectedRoute> }
                        />
                        <Route
                            path="/my-list"
                            view=|| view! { <ProtectedRoute><MyListPage /></ProtectedRoute> }
                        />
                        <Route
                            path="/profile"
                            view=|| view! { <ProtectedRoute><ProfilePage /></ProtectedRoute> }
                        />
                        <Route
                            path="/watch/:id"
                            view=|| view! { <ProtectedRoute><WatchPage /></ProtectedRoute> }
                        />
                    </Routes>
                </main>
                <ToastContainer />
            </Router>
        </CatalogProvider>
    }
    .into_view()
}
