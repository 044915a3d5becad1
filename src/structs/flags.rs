use bitflags::bitflags;

bitflags! {
    /// Map-wide flag set stored as a single u32 in its own lump.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct LevelFlags: u32 {
        const BAKED_STATIC_PROP_LIGHTING_NONHDR = 0x0001;
        const BAKED_STATIC_PROP_LIGHTING_HDR = 0x0002;
        const LIGHTSTYLES_WITH_CSM = 0x0004;
        const BAKED_STATIC_PROP_LIGHTING_3 = 0x0008;
    }
}
