// Copyright 2025 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use arbor_layout::NodeId;
use arbor_view::Stage;

/// Something the host may want to react to.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum EngineEvent {
    /// A node was tapped.
    Selected(NodeId),
    /// A node was long-pressed.
    LongPressed(NodeId),
    /// A programmatic move toward a node began.
    NavigationStarted {
        /// Node being navigated to.
        target: NodeId,
        /// Where the camera will land.
        stage: Stage,
    },
    /// A hero chip was tapped and the camera is fitting its subtree.
    HeroFocused(NodeId),
}
