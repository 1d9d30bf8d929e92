use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use nxui_core::{Button, TouchInfo, Vec2};
use serde::Deserialize;

/// One frame of scripted input: buttons held during the frame and an
/// optional tap position.
#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ScriptFrame {
    pub hold: Vec<String>,
    pub tap: Option<[f32; 2]>,
}

impl ScriptFrame {
    pub fn held(&self) -> Result<Button> {
        self.hold.iter().try_fold(Button::empty(), |held, name| {
            match Button::from_name(name) {
                Some(button) => Ok(held | button),
                None => bail!("unknown button {name:?}"),
            }
        })
    }

    pub fn touch(&self) -> TouchInfo {
        match self.tap {
            Some([x, y]) => TouchInfo::click(Vec2::new(x, y)),
            None => TouchInfo::default(),
        }
    }
}

pub fn load(path: &Path) -> Result<Vec<ScriptFrame>> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("reading script {}", path.display()))?;
    serde_json::from_str(&data)
        .with_context(|| format!("parsing script {}", path.display()))
}

/// Walk down the list, toggle and open the selector, then close with B.
pub fn builtin() -> Vec<ScriptFrame> {
    let hold = |names: &[&str]| ScriptFrame {
        hold: names.iter().map(|name| name.to_string()).collect(),
        tap: None,
    };
    let idle = ScriptFrame::default();

    vec![
        hold(&["A"]),
        idle.clone(),
        hold(&["DPAD_DOWN"]),
        idle.clone(),
        hold(&["A"]),
        idle.clone(),
        hold(&["LS_DOWN"]),
        idle.clone(),
        hold(&["A"]),
        idle.clone(),
        hold(&["B"]),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_json_frames_when_parsed_then_buttons_and_taps_resolve() {
        let frames: Vec<ScriptFrame> = serde_json::from_str(
            r#"[{"hold": ["A", "DPAD_UP"]}, {"tap": [10.0, 20.0]}, {}]"#,
        )
        .expect("script parses");

        assert_eq!(frames.len(), 3);
        assert_eq!(
            frames[0].held().expect("known buttons"),
            Button::A | Button::DPAD_UP
        );
        assert_eq!(frames[1].touch(), TouchInfo::click(Vec2::new(10.0, 20.0)));
        assert_eq!(frames[2].held().expect("no buttons"), Button::empty());
    }

    #[test]
    fn given_unknown_button_when_resolved_then_error_names_it() {
        let frame = ScriptFrame {
            hold: vec!["TURBO".into()],
            tap: None,
        };

        let err = frame.held().expect_err("unknown button");

        assert!(err.to_string().contains("TURBO"));
    }

    #[test]
    fn builtin_script_uses_known_buttons() {
        for frame in builtin() {
            assert!(frame.held().is_ok());
        }
    }
}
