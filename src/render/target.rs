//! Contracts between the engine and the host rendering layer.
//!
//! The engine only computes values; these traits are the narrow surface it
//! pushes them through. The host owns the scene graph and supplies opaque
//! node handles via [`HostLayer`].

use crate::foundation::core::{Rgba, Vec2, Vec3};
use crate::timeline::state::TextAlign;

/// Shared per-frame surface of canvas-anchored nodes (sprite, text, video).
///
/// Setters are only called for fields the timeline actually sets; an unset
/// field leaves the host's property untouched for the frame.
pub trait CanvasNode {
    /// Position the node, in pixels.
    fn set_position(&mut self, position: Vec2);
    /// Rotate the node (Euler radians).
    fn set_rotation(&mut self, rotation: Vec3);
    /// Scale the node.
    fn set_scale(&mut self, scale: Vec2);
    /// Move the node's pivot (normalized within its bounds).
    fn set_pivot(&mut self, pivot: Vec2);
    /// Resize the node, in pixels.
    fn set_size(&mut self, size: Vec2);
    /// Set the node's opacity in `[0, 1]`.
    fn set_opacity(&mut self, opacity: f64);
    /// Set the node's tint color.
    ///
    /// When the timeline also sets opacity, the tint arrives with its alpha
    /// already multiplied by the eased opacity; hosts honoring both channels
    /// must not apply the opacity to the tint a second time.
    fn set_tint(&mut self, tint: Rgba);
    /// Assign the node to a storyboard layer (always in `[0, 2]`).
    fn set_layer(&mut self, layer: u8);
    /// Set the node's draw order within its layer.
    fn set_order(&mut self, order: i32);
    /// Reset the node to an inert default (invisible, zero-area).
    ///
    /// Must be idempotent.
    fn clear(&mut self);
}

/// An image node handle.
pub trait SpriteNode: CanvasNode {}

/// A video surface node handle.
pub trait VideoNode: CanvasNode {}

/// A text/glyph layout node handle.
pub trait TextNode: CanvasNode {
    /// Replace the displayed string.
    fn set_text(&mut self, text: &str);
    /// Set the font size in pixels.
    fn set_font_size(&mut self, size: f64);
    /// Set horizontal alignment.
    fn set_alignment(&mut self, align: TextAlign);
    /// Set letter spacing in pixels.
    fn set_letter_spacing(&mut self, spacing: f64);
    /// Set the font weight (CSS-style 100..=900).
    fn set_font_weight(&mut self, weight: u32);
}

/// A polyline primitive handle.
pub trait LineNode {
    /// Replace the world-space point list.
    fn set_points(&mut self, points: &[Vec3]);
    /// Set the stroke width.
    fn set_width(&mut self, width: f64);
    /// Set the start and end stroke colors.
    fn set_colors(&mut self, start: Rgba, end: Rgba);
    /// Set the polyline opacity in `[0, 1]`.
    fn set_opacity(&mut self, opacity: f64);
    /// Assign the polyline to a storyboard layer (always in `[0, 2]`).
    fn set_layer(&mut self, layer: u8);
    /// Set the draw order within the layer.
    fn set_order(&mut self, order: i32);
    /// Reset to an inert default. Must be idempotent.
    fn clear(&mut self);
}

/// Progress of an asynchronous node acquisition.
pub enum NodePoll<T> {
    /// Still loading; poll again next frame.
    Pending,
    /// Acquisition finished.
    Ready(T),
    /// Acquisition failed (asset missing or corrupt). Terminal.
    Failed(String),
}

/// A suspended node acquisition, polled once per frame from the game loop.
///
/// Dropping the handle cancels the load; a cancelled load is simply never
/// polled again, so it cannot call back into a disposed renderer.
pub trait NodeLoad {
    /// The node handle produced on success.
    type Node;

    /// Drive the load one step.
    ///
    /// After returning [`NodePoll::Ready`] or [`NodePoll::Failed`] the handle
    /// will not be polled again.
    fn poll(&mut self) -> NodePoll<Self::Node>;
}

/// Factory surface of the host rendering layer.
///
/// Image and video nodes may need decode I/O, so they come back as pending
/// loads; text and line nodes are plain scene-graph nodes created
/// synchronously.
pub trait HostLayer {
    /// Begin loading an image node for `source`.
    fn load_sprite(&mut self, source: &str) -> Box<dyn NodeLoad<Node = Box<dyn SpriteNode>>>;
    /// Begin loading a video surface node for `source`.
    fn load_video(&mut self, source: &str) -> Box<dyn NodeLoad<Node = Box<dyn VideoNode>>>;
    /// Create a text node.
    fn create_text(&mut self) -> Box<dyn TextNode>;
    /// Create a polyline node.
    fn create_line(&mut self) -> Box<dyn LineNode>;
}
