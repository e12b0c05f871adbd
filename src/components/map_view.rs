use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{HtmlElement, SvgElement, TouchEvent};
use yew::prelude::*;

use crate::config::ViewerConfig;
use crate::render;
use crate::state::{Gesture, MapEngine, Point, ViewRect};

use super::zoom_controls::ZoomControls;

/// Samples the container geometry fresh; never cached across events so layout
/// changes are always picked up.
fn view_rect(container: &HtmlElement) -> ViewRect {
    let rect = container.get_bounding_client_rect();
    ViewRect::new(rect.left(), rect.top(), rect.width(), rect.height())
}

fn contact_points(event: &TouchEvent) -> Vec<Point> {
    let touches = event.touches();
    let mut contacts = Vec::with_capacity(touches.length() as usize);
    for i in 0..touches.length() {
        if let Some(t) = touches.item(i) {
            contacts.push(Point::new(t.client_x() as f64, t.client_y() as f64));
        }
    }
    contacts
}

#[function_component(MapView)]
pub fn map_view() -> Html {
    let container_ref = use_node_ref();
    let readout_ref = use_node_ref();
    let engine = use_mut_ref(|| MapEngine::new(ViewerConfig::load()));
    let project_ref = use_mut_ref(|| None::<Rc<dyn Fn()>>);

    // Mount effect: acquire the render target, wire the DOM listeners.
    {
        let container_ref = container_ref.clone();
        let readout_ref = readout_ref.clone();
        let engine = engine.clone();
        let project_ref_setup = project_ref.clone();
        use_effect_with((), move |_| {
            let window = web_sys::window().expect("window");
            let document = window.document().expect("document");
            let container: HtmlElement =
                container_ref.cast::<HtmlElement>().expect("map container");

            // Render target handle; re-acquired whenever the viewport resizes.
            let svg_handle = Rc::new(RefCell::new(None::<SvgElement>));
            let acquire_svg = {
                let document = document.clone();
                let svg_handle = svg_handle.clone();
                move || {
                    *svg_handle.borrow_mut() = document
                        .query_selector("#map svg")
                        .ok()
                        .flatten()
                        .and_then(|el| el.dyn_into::<SvgElement>().ok());
                }
            };
            acquire_svg();

            // Projection closure: scene -> transform + readout.
            let project: Rc<dyn Fn()> = {
                let engine = engine.clone();
                let svg_handle = svg_handle.clone();
                let readout_ref = readout_ref.clone();
                Rc::new(move || {
                    if let Some(svg) = &*svg_handle.borrow() {
                        let eng = engine.borrow();
                        let readout = readout_ref.cast::<HtmlElement>();
                        render::project(svg, readout.as_ref(), eng.scene());
                    }
                })
            };
            *project_ref_setup.borrow_mut() = Some(project.clone());
            project();

            // Wheel zoom
            let wheel_cb = {
                let engine = engine.clone();
                let container = container.clone();
                let project = project.clone();
                Closure::wrap(Box::new(move |e: web_sys::WheelEvent| {
                    e.prevent_default();
                    let rect = view_rect(&container);
                    let origin = Point::new(e.client_x() as f64, e.client_y() as f64);
                    let changed = engine.borrow_mut().wheel(e.delta_y(), origin, &rect);
                    if changed {
                        project();
                    }
                }) as Box<dyn FnMut(_)>)
            };
            container
                .add_event_listener_with_callback("wheel", wheel_cb.as_ref().unchecked_ref())
                .unwrap();

            // Mouse drag
            let mousedown_cb = {
                let engine = engine.clone();
                Closure::wrap(Box::new(move |e: web_sys::MouseEvent| {
                    engine
                        .borrow_mut()
                        .pointer_down(Point::new(e.client_x() as f64, e.client_y() as f64));
                }) as Box<dyn FnMut(_)>)
            };
            container
                .add_event_listener_with_callback(
                    "mousedown",
                    mousedown_cb.as_ref().unchecked_ref(),
                )
                .unwrap();
            let mousemove_cb = {
                let engine = engine.clone();
                let project = project.clone();
                Closure::wrap(Box::new(move |e: web_sys::MouseEvent| {
                    let changed = engine
                        .borrow_mut()
                        .pointer_move(Point::new(e.client_x() as f64, e.client_y() as f64));
                    if changed {
                        e.prevent_default();
                        project();
                    }
                }) as Box<dyn FnMut(_)>)
            };
            window
                .add_event_listener_with_callback(
                    "mousemove",
                    mousemove_cb.as_ref().unchecked_ref(),
                )
                .unwrap();
            let mouseup_cb = {
                let engine = engine.clone();
                Closure::wrap(Box::new(move |_e: web_sys::MouseEvent| {
                    engine.borrow_mut().pointer_up();
                }) as Box<dyn FnMut(_)>)
            };
            window
                .add_event_listener_with_callback("mouseup", mouseup_cb.as_ref().unchecked_ref())
                .unwrap();
            document
                .add_event_listener_with_callback("mouseleave", mouseup_cb.as_ref().unchecked_ref())
                .unwrap();

            // Touch drag / pinch
            let touch_start_cb = {
                let engine = engine.clone();
                Closure::wrap(Box::new(move |e: TouchEvent| {
                    engine.borrow_mut().touch_start(&contact_points(&e));
                }) as Box<dyn FnMut(_)>)
            };
            container
                .add_event_listener_with_callback(
                    "touchstart",
                    touch_start_cb.as_ref().unchecked_ref(),
                )
                .ok();
            let touch_move_cb = {
                let engine = engine.clone();
                let container = container.clone();
                let project = project.clone();
                Closure::wrap(Box::new(move |e: TouchEvent| {
                    let contacts = contact_points(&e);
                    let rect = view_rect(&container);
                    let changed = {
                        let mut eng = engine.borrow_mut();
                        if eng.gesture() != Gesture::Idle {
                            e.prevent_default();
                        }
                        eng.touch_move(&contacts, &rect)
                    };
                    if changed {
                        project();
                    }
                }) as Box<dyn FnMut(_)>)
            };
            // Document-level and non-passive: the move must keep tracking
            // after the fingers wander off the surface, and preventDefault
            // must stay effective there.
            let touch_move_opts = web_sys::AddEventListenerOptions::new();
            touch_move_opts.set_passive(false);
            document
                .add_event_listener_with_callback_and_add_event_listener_options(
                    "touchmove",
                    touch_move_cb.as_ref().unchecked_ref(),
                    &touch_move_opts,
                )
                .ok();
            let touch_end_cb = {
                let engine = engine.clone();
                Closure::wrap(Box::new(move |_e: TouchEvent| {
                    engine.borrow_mut().touch_end();
                }) as Box<dyn FnMut(_)>)
            };
            document
                .add_event_listener_with_callback("touchend", touch_end_cb.as_ref().unchecked_ref())
                .ok();
            document
                .add_event_listener_with_callback(
                    "touchcancel",
                    touch_end_cb.as_ref().unchecked_ref(),
                )
                .ok();

            // Resize: fresh render target, back to the initial view.
            let resize_cb = {
                let engine = engine.clone();
                let acquire_svg = acquire_svg.clone();
                let project = project.clone();
                Closure::wrap(Box::new(move |_e: web_sys::Event| {
                    acquire_svg();
                    engine.borrow_mut().reset();
                    project();
                }) as Box<dyn FnMut(_)>)
            };
            window
                .add_event_listener_with_callback("resize", resize_cb.as_ref().unchecked_ref())
                .unwrap();

            // Cleanup
            let window_clone = window.clone();
            let document_clone = document.clone();
            move || {
                let _ = container.remove_event_listener_with_callback(
                    "wheel",
                    wheel_cb.as_ref().unchecked_ref(),
                );
                let _ = container.remove_event_listener_with_callback(
                    "mousedown",
                    mousedown_cb.as_ref().unchecked_ref(),
                );
                let _ = window_clone.remove_event_listener_with_callback(
                    "mousemove",
                    mousemove_cb.as_ref().unchecked_ref(),
                );
                let _ = window_clone.remove_event_listener_with_callback(
                    "mouseup",
                    mouseup_cb.as_ref().unchecked_ref(),
                );
                let _ = document_clone.remove_event_listener_with_callback(
                    "mouseleave",
                    mouseup_cb.as_ref().unchecked_ref(),
                );
                let _ = container.remove_event_listener_with_callback(
                    "touchstart",
                    touch_start_cb.as_ref().unchecked_ref(),
                );
                let _ = document_clone.remove_event_listener_with_callback(
                    "touchmove",
                    touch_move_cb.as_ref().unchecked_ref(),
                );
                let _ = document_clone.remove_event_listener_with_callback(
                    "touchend",
                    touch_end_cb.as_ref().unchecked_ref(),
                );
                let _ = document_clone.remove_event_listener_with_callback(
                    "touchcancel",
                    touch_end_cb.as_ref().unchecked_ref(),
                );
                let _ = window_clone.remove_event_listener_with_callback(
                    "resize",
                    resize_cb.as_ref().unchecked_ref(),
                );
                let _keep_alive = (
                    &wheel_cb,
                    &mousedown_cb,
                    &mousemove_cb,
                    &mouseup_cb,
                    &touch_start_cb,
                    &touch_move_cb,
                    &touch_end_cb,
                    &resize_cb,
                );
            }
        });
    }

    // Button zoom: one fixed step around the viewport center.
    let zoom_in = {
        let engine = engine.clone();
        let container_ref = container_ref.clone();
        let project_ref = project_ref.clone();
        Callback::from(move |_| {
            if let Some(container) = container_ref.cast::<HtmlElement>() {
                engine.borrow_mut().zoom_in(&view_rect(&container));
                if let Some(f) = &*project_ref.borrow() {
                    f();
                }
            }
        })
    };
    let zoom_out = {
        let engine = engine.clone();
        let container_ref = container_ref.clone();
        let project_ref = project_ref.clone();
        Callback::from(move |_| {
            if let Some(container) = container_ref.cast::<HtmlElement>() {
                engine.borrow_mut().zoom_out(&view_rect(&container));
                if let Some(f) = &*project_ref.borrow() {
                    f();
                }
            }
        })
    };

    html! {
        <div
            id="map"
            ref={container_ref}
            style="position:relative; width:100%; height:100vh; overflow:hidden; background:#0e1116; touch-action:none; cursor:grab;"
        >
            <svg
                viewBox="0 0 1000 1000"
                style="display:block; width:100%; height:100%; transform-origin:0 0;"
            >
                <rect x="0" y="0" width="1000" height="1000" fill="#10253a" />
                <path
                    d="M 120 640 Q 180 420 340 380 Q 520 330 610 210 Q 700 120 840 180 Q 930 230 900 400 Q 870 560 720 620 Q 600 670 520 790 Q 430 890 280 850 Q 140 800 120 640 Z"
                    fill="#1d3b2a"
                    stroke="#2f5d43"
                    stroke-width="3"
                />
                <path
                    d="M 300 120 Q 360 300 330 470 Q 310 620 420 780"
                    fill="none"
                    stroke="#2d6a8a"
                    stroke-width="8"
                    stroke-linecap="round"
                />
                <circle cx="420" cy="420" r="14" fill="#e3b341" />
                <circle cx="650" cy="300" r="10" fill="#e3b341" />
                <circle cx="560" cy="660" r="10" fill="#e3b341" />
                <text x="445" y="426" fill="#c9d1d9" font-size="26">{"Aldermere"}</text>
                <text x="668" y="306" fill="#c9d1d9" font-size="22">{"Norwick"}</text>
                <text x="578" y="666" fill="#c9d1d9" font-size="22">{"Sudhaven"}</text>
            </svg>
            <ZoomControls on_zoom_in={zoom_in} on_zoom_out={zoom_out} readout_ref={readout_ref} />
        </div>
    }
}
