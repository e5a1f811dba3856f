use crate::util::stable_unit;

const GLITCH_GLYPHS: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789@#$%&";

/// Reveals `text` left to right as `progress` goes from 0 to 1, scrambling the rest.
pub(in crate::app) fn glitch_text(text: &str, progress: f32, seed: u64) -> String {
    if progress >= 1.0 {
        return text.to_owned();
    }

    let revealed = progress.max(0.0) * text.chars().count() as f32;
    text.chars()
        .enumerate()
        .map(|(index, ch)| {
            if (index as f32) < revealed {
                ch
            } else {
                let pick = (stable_unit((seed, index)) * GLITCH_GLYPHS.len() as f32) as usize;
                GLITCH_GLYPHS[pick.min(GLITCH_GLYPHS.len() - 1)] as char
            }
        })
        .collect()
}

pub(in crate::app) fn advance_hover_progress(progress: f32, active: bool, any_hovered: bool) -> f32 {
    if active {
        return (progress + 0.1).min(1.0);
    }

    let next = (progress - 0.05).max(0.0);
    if !any_hovered && next < 0.01 { 0.0 } else { next }
}
