use pagecraft_parser::ast::{Animation, AnimationKind, AnimationTrigger, SlideDirection};

/// Intrinsic tags that accept the motion-runtime prefix. Components are
/// never prefixed; an animation on anything else is carried in the tree
/// but not emitted.
pub const ANIMATABLE_TAGS: &[&str] = &[
    "div", "section", "article", "header", "footer", "main", "aside", "nav", "span", "p", "h1",
    "h2", "h3", "h4", "h5", "h6", "ul", "ol", "li", "button", "a", "img", "form",
];

pub fn is_animatable(tag: &str) -> bool {
    ANIMATABLE_TAGS.contains(&tag)
}

/// One synthesized motion prop: `name={value}` where `value` is an object
/// literal source string.
#[derive(Debug, Clone, PartialEq)]
pub struct MotionProp {
    pub name: &'static str,
    pub value: String,
}

/// Compile a declarative animation descriptor into motion props.
///
/// Fixed case table: entrance kinds get initial/animate (or whileInView)
/// pairs, keyframe kinds (bounce, pulse) get a keyframed target, gesture
/// triggers (hover, click) get a gesture target. Combinations without a
/// natural gesture mapping fall back to a plain opacity fade.
pub fn motion_props(animation: &Animation) -> Vec<MotionProp> {
    let mut props = Vec::new();

    match animation.trigger {
        AnimationTrigger::Load | AnimationTrigger::InView => {
            let target = if animation.trigger == AnimationTrigger::Load {
                "animate"
            } else {
                "whileInView"
            };
            if let Some(frames) = keyframe_target(animation) {
                props.push(MotionProp {
                    name: target,
                    value: frames,
                });
            } else {
                let (from, to) = enter_targets(animation);
                props.push(MotionProp {
                    name: "initial",
                    value: from,
                });
                props.push(MotionProp {
                    name: target,
                    value: to,
                });
            }
            if animation.trigger == AnimationTrigger::InView {
                props.push(MotionProp {
                    name: "viewport",
                    value: "{ once: true }".to_string(),
                });
            }
        }
        AnimationTrigger::Hover => props.push(MotionProp {
            name: "whileHover",
            value: gesture_target(animation),
        }),
        AnimationTrigger::Click => props.push(MotionProp {
            name: "whileTap",
            value: gesture_target(animation),
        }),
    }

    props.push(MotionProp {
        name: "transition",
        value: transition(animation),
    });
    props
}

/// initial/target pair for entrance animations.
fn enter_targets(animation: &Animation) -> (String, String) {
    match animation.kind {
        AnimationKind::Slide => {
            let distance = animation.distance.unwrap_or(50.0);
            let (axis, sign) = match animation.direction.unwrap_or(SlideDirection::Up) {
                SlideDirection::Up => ("y", 1.0),
                SlideDirection::Down => ("y", -1.0),
                SlideDirection::Left => ("x", 1.0),
                SlideDirection::Right => ("x", -1.0),
            };
            (
                format!("{{ opacity: 0, {}: {} }}", axis, num(sign * distance)),
                format!("{{ opacity: 1, {}: 0 }}", axis),
            )
        }
        AnimationKind::Scale => {
            let start = animation.intensity.unwrap_or(0.8);
            (
                format!("{{ opacity: 0, scale: {} }}", num(start)),
                "{ opacity: 1, scale: 1 }".to_string(),
            )
        }
        AnimationKind::Rotate => {
            let angle = animation.angle.unwrap_or(180.0);
            (
                format!("{{ opacity: 0, rotate: {} }}", num(-angle)),
                "{ opacity: 1, rotate: 0 }".to_string(),
            )
        }
        AnimationKind::Flip => {
            let angle = animation.angle.unwrap_or(90.0);
            (
                format!("{{ opacity: 0, rotateY: {} }}", num(angle)),
                "{ opacity: 1, rotateY: 0 }".to_string(),
            )
        }
        // Fade, and any keyframe kind that reached here
        _ => ("{ opacity: 0 }".to_string(), "{ opacity: 1 }".to_string()),
    }
}

/// Keyframed target for the self-oscillating kinds.
fn keyframe_target(animation: &Animation) -> Option<String> {
    match animation.kind {
        AnimationKind::Bounce => {
            let distance = animation.distance.unwrap_or(20.0);
            Some(format!("{{ y: [0, {}, 0] }}", num(-distance)))
        }
        AnimationKind::Pulse => {
            let peak = animation.intensity.unwrap_or(1.05);
            Some(format!("{{ scale: [1, {}, 1] }}", num(peak)))
        }
        _ => None,
    }
}

/// Target for gesture triggers. Entrance-only kinds have no sensible
/// gesture shape and fall back to the plain opacity fade.
fn gesture_target(animation: &Animation) -> String {
    match animation.kind {
        AnimationKind::Scale | AnimationKind::Pulse => {
            format!("{{ scale: {} }}", num(animation.intensity.unwrap_or(1.05)))
        }
        AnimationKind::Rotate => {
            format!("{{ rotate: {} }}", num(animation.angle.unwrap_or(15.0)))
        }
        AnimationKind::Bounce => {
            format!("{{ y: {} }}", num(-animation.distance.unwrap_or(8.0)))
        }
        AnimationKind::Fade | AnimationKind::Slide | AnimationKind::Flip => {
            "{ opacity: 0.7 }".to_string()
        }
    }
}

fn transition(animation: &Animation) -> String {
    let mut parts = vec![format!("duration: {}", num(animation.duration))];
    if animation.delay > 0.0 {
        parts.push(format!("delay: {}", num(animation.delay)));
    }
    match animation.repeat {
        Some(0) => parts.push("repeat: Infinity".to_string()),
        Some(n) => parts.push(format!("repeat: {}", n)),
        None => {}
    }
    parts.push(format!("ease: \"{}\"", animation.ease));
    format!("{{ {} }}", parts.join(", "))
}

/// Render a number without a trailing `.0`.
fn num(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}
