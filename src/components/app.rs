use yew::prelude::*;

use super::map_view::MapView;

#[function_component(App)]
pub fn app() -> Html {
    html! { <MapView /> }
}
