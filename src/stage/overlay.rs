//! 2D caption overlays animated alongside the 3D stage.
//!
//! Overlays are optional: a timeline authored against a richer page layout
//! still runs when some captions are absent — writes to a missing overlay
//! are silent no-ops.

use glam::Vec2;

/// Animatable style scalars for one caption overlay.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayStyle {
    /// Opacity in [0, 1]. Captions author in and out from 0.
    pub opacity: f32,
    /// Translation offset in CSS pixels (slide-in effects).
    pub translate: Vec2,
    /// Uniform scale factor.
    pub scale: f32,
    /// Letter spacing in em units (tracking effects).
    pub letter_spacing: f32,
}

impl Default for OverlayStyle {
    fn default() -> Self {
        Self {
            opacity: 0.0,
            translate: Vec2::ZERO,
            scale: 1.0,
            letter_spacing: 0.1,
        }
    }
}

impl OverlayStyle {
    /// Whether the overlay contributes anything visible this frame.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.opacity > 0.0
    }
}

/// Scalar overlay properties addressable by keyframes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OverlayProp {
    /// `OverlayStyle::opacity`.
    Opacity,
    /// X component of `OverlayStyle::translate`.
    TranslateX,
    /// Y component of `OverlayStyle::translate`.
    TranslateY,
    /// `OverlayStyle::scale`.
    Scale,
    /// `OverlayStyle::letter_spacing`.
    LetterSpacing,
}

impl OverlayStyle {
    /// Mutable access to one scalar field.
    pub fn field_mut(&mut self, prop: OverlayProp) -> &mut f32 {
        match prop {
            OverlayProp::Opacity => &mut self.opacity,
            OverlayProp::TranslateX => &mut self.translate.x,
            OverlayProp::TranslateY => &mut self.translate.y,
            OverlayProp::Scale => &mut self.scale,
            OverlayProp::LetterSpacing => &mut self.letter_spacing,
        }
    }

    /// Read one scalar field.
    #[must_use]
    pub fn field(&self, prop: OverlayProp) -> f32 {
        match prop {
            OverlayProp::Opacity => self.opacity,
            OverlayProp::TranslateX => self.translate.x,
            OverlayProp::TranslateY => self.translate.y,
            OverlayProp::Scale => self.scale,
            OverlayProp::LetterSpacing => self.letter_spacing,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_hidden() {
        let style = OverlayStyle::default();
        assert!(!style.is_visible());
        assert_eq!(style.scale, 1.0);
    }

    #[test]
    fn field_accessors_round_trip() {
        let mut style = OverlayStyle::default();
        for prop in [
            OverlayProp::Opacity,
            OverlayProp::TranslateX,
            OverlayProp::TranslateY,
            OverlayProp::Scale,
            OverlayProp::LetterSpacing,
        ] {
            *style.field_mut(prop) = 0.42;
            assert_eq!(style.field(prop), 0.42);
        }
    }
}
