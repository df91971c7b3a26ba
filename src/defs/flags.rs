use bitflags::bitflags;

bitflags! {
    /// Behaviour flags carried by every scenery class.
    #[derive(Default, Clone, Copy, Debug, PartialEq, Eq)]
    pub struct PropFlags: u16 {
        /// Contributes a box to the obstacle set.
        const SOLID          = 0x0001;
        /// Box is recomputed from the transform every frame
        /// (wandering animals, the RV); otherwise baked at load.
        const DYNAMIC_BOUNDS = 0x0002;
        /// Carries an animation mixer.
        const ANIMATED       = 0x0004;
        /// Decorative light source (campfire, lanterns).
        const EMITS_LIGHT    = 0x0008;
    }
}
