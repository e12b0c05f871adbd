use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct ZoomControlsProps {
    pub on_zoom_in: Callback<()>,
    pub on_zoom_out: Callback<()>,
    /// The percentage readout element; the render projection writes its text
    /// directly so it stays live during gestures without re-rendering.
    pub readout_ref: NodeRef,
}

#[function_component(ZoomControls)]
pub fn zoom_controls(props: &ZoomControlsProps) -> Html {
    let zi = {
        let cb = props.on_zoom_in.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let zo = {
        let cb = props.on_zoom_out.clone();
        Callback::from(move |_| cb.emit(()))
    };
    html! {<div style="position:absolute; right:12px; bottom:12px; background:rgba(22,27,34,0.9); border:1px solid #30363d; border-radius:8px; padding:8px; display:flex; gap:6px; align-items:center; color:#c9d1d9;">
        <button onclick={zo}> {"-"} </button>
        <span ref={props.readout_ref.clone()} style="min-width:44px; text-align:center;">{"100%"}</span>
        <button onclick={zi}> {"+"} </button>
    </div>}
}
