use std::cell::RefCell;
use std::f64::consts::TAU;
use std::rc::Rc;

use gloo::events::EventListener;
use log::Level;
use serde_json::json;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};
use yew::prelude::*;

use super::{dom, FrameLoop};
use crate::error::{EffectError, Result};
use crate::logging::log_event;
use crate::particles::ParticleField;

const CANVAS_STYLE: &str =
    "position:fixed;top:0;left:0;width:100%;height:100%;pointer-events:none;z-index:-1";
const SHAPES_STYLE: &str =
    "position:fixed;top:0;left:0;width:100%;height:100%;pointer-events:none;z-index:-2";

const EFFECT_KEYFRAMES: &str = r#"
.cursor { animation: blink 1s infinite; color: #00d4ff; }
@keyframes blink { 0%, 50% { opacity: 1; } 51%, 100% { opacity: 0; } }
@keyframes shake {
    0%, 100% { transform: translateX(0); }
    10%, 30%, 50%, 70%, 90% { transform: translateX(-5px); }
    20%, 40%, 60%, 80% { transform: translateX(5px); }
}
@keyframes morph1 {
    0%, 100% { transform: translate(0, 0) scale(1); }
    25% { transform: translate(100px, -50px) scale(1.2); }
    50% { transform: translate(-50px, 100px) scale(0.8); }
    75% { transform: translate(150px, 50px) scale(1.1); }
}
@keyframes morph2 {
    0%, 100% { transform: translate(0, 0) scale(1) rotate(0deg); }
    33% { transform: translate(-80px, -100px) scale(1.3) rotate(120deg); }
    66% { transform: translate(120px, -80px) scale(0.9) rotate(240deg); }
}
@keyframes morph3 {
    0%, 100% { transform: translate(0, 0) scale(1); }
    50% { transform: translate(-100px, -150px) scale(1.5); }
}
"#;

struct MorphShape {
    anchor: &'static str,
    size_px: u32,
    rgb: &'static str,
    animation: &'static str,
    period_secs: u32,
}

impl MorphShape {
    fn style(&self) -> String {
        format!(
            "position:absolute;{anchor};width:{size}px;height:{size}px;\
             background:radial-gradient(circle,rgba({rgb},0.1) 0%,transparent 70%);\
             border-radius:50%;animation:{animation} {period}s ease-in-out infinite;",
            anchor = self.anchor,
            size = self.size_px,
            rgb = self.rgb,
            animation = self.animation,
            period = self.period_secs,
        )
    }
}

const MORPH_SHAPES: [MorphShape; 3] = [
    MorphShape {
        anchor: "top:10%;left:10%",
        size_px: 200,
        rgb: "0,212,255",
        animation: "morph1",
        period_secs: 20,
    },
    MorphShape {
        anchor: "top:60%;right:10%",
        size_px: 300,
        rgb: "255,0,128",
        animation: "morph2",
        period_secs: 25,
    },
    MorphShape {
        anchor: "bottom:20%;left:30%",
        size_px: 150,
        rgb: "138,43,226",
        animation: "morph3",
        period_secs: 15,
    },
];

#[derive(Properties, PartialEq)]
pub(crate) struct BackdropProps {
    pub particle_count: usize,
}

struct ParticleAnimation {
    _frames: FrameLoop,
    _resize: EventListener,
}

fn start_particles(canvas: &HtmlCanvasElement, count: usize) -> Result<ParticleAnimation> {
    let context = canvas
        .get_context("2d")
        .map_err(dom::js_error("canvas context"))?
        .ok_or_else(|| EffectError::js("canvas context", "2d context unavailable"))?
        .dyn_into::<CanvasRenderingContext2d>()
        .map_err(|_| EffectError::js("canvas context", "unexpected context type"))?;

    let (width, height) = dom::viewport_size();
    canvas.set_width(width as u32);
    canvas.set_height(height as u32);

    let field = Rc::new(RefCell::new(ParticleField::seeded(
        &mut rand::thread_rng(),
        count,
        width,
        height,
    )));

    let resize = {
        let canvas = canvas.clone();
        let field = Rc::clone(&field);
        EventListener::new(&dom::browser_window()?, "resize", move |_| {
            let (width, height) = dom::viewport_size();
            canvas.set_width(width as u32);
            canvas.set_height(height as u32);
            field.borrow_mut().resize(width, height);
        })
    };

    let frames = FrameLoop::start(move |_| {
        let mut field = field.borrow_mut();
        let (width, height) = field.bounds();
        context.clear_rect(0.0, 0.0, width, height);
        field.step();

        for particle in field.particles() {
            context.begin_path();
            if context
                .arc(particle.x, particle.y, particle.radius, 0.0, TAU)
                .is_err()
            {
                continue;
            }
            context.set_fill_style_str(&particle.fill_style());
            context.fill();
        }
    });

    Ok(ParticleAnimation {
        _frames: frames,
        _resize: resize,
    })
}

#[function_component(Backdrop)]
pub(crate) fn backdrop(props: &BackdropProps) -> Html {
    let canvas_ref = use_node_ref();

    {
        let canvas_ref = canvas_ref.clone();
        use_effect_with(props.particle_count, move |count| {
            let animation = canvas_ref
                .cast::<HtmlCanvasElement>()
                .ok_or_else(|| EffectError::missing("backdrop canvas"))
                .and_then(|canvas| start_particles(&canvas, *count));

            match &animation {
                Ok(_) => log_event(
                    Level::Debug,
                    "effect_started",
                    json!({ "effect": "particles", "count": count }),
                ),
                Err(error) => log_event(
                    Level::Warn,
                    "effect_skipped",
                    json!({ "effect": "particles", "reason": error.class(), "detail": error.to_string() }),
                ),
            }

            move || drop(animation)
        });
    }

    html! {
        <>
            <style>{EFFECT_KEYFRAMES}</style>
            <div class="morphing-shapes" style={SHAPES_STYLE} aria-hidden="true">
                { for MORPH_SHAPES.iter().map(|shape| html! { <div style={shape.style()}></div> }) }
            </div>
            <canvas class="particle-layer" ref={canvas_ref} style={CANVAS_STYLE} aria-hidden="true"></canvas>
        </>
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    #[wasm_bindgen_test]
    fn morph_shape_style_carries_animation() {
        let style = MORPH_SHAPES[1].style();
        assert!(style.contains("right:10%"));
        assert!(style.contains("width:300px;height:300px"));
        assert!(style.contains("animation:morph2 25s ease-in-out infinite"));
    }
}
