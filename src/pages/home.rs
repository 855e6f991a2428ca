use leptos::prelude::*;

use crate::components::dependency_graph::{DEFAULT_TITLE, DependencyGraphCanvas};
use crate::graph::{DEFAULT_GRAPH_PATH, DependencyGraph, load_dependency_graph};

/// Default Home Page: the dependency graph read from `path`.
#[component]
pub fn Home(
	#[prop(into, default = DEFAULT_GRAPH_PATH.to_string())] path: String,
	#[prop(into, default = DEFAULT_TITLE.to_string())] title: String,
) -> impl IntoView {
	let document = LocalResource::new(move || load_dependency_graph(path.clone()));

	view! {
		<Suspense fallback=|| view! { <p class="loading">"Loading dependency graph..."</p> }>
			<ErrorBoundary fallback=|errors| {
				view! {
					<h1>"Uh oh! Something went wrong!"</h1>

					<p>"Errors: "</p>
					<ul>
						{move || {
							errors
								.get()
								.into_iter()
								.map(|(_, e)| view! { <li>{e.to_string()}</li> })
								.collect_view()
						}}
					</ul>
				}
			}>
				{move || {
					let title = title.clone();
					Suspend::new(async move {
						document
							.await
							.map(|doc| {
								let graph = DependencyGraph::build(&doc);
								view! { <DependencyGraphCanvas graph=graph title=title /> }
							})
					})
				}}
			</ErrorBoundary>
		</Suspense>
	}
}
