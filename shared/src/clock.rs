/// One-shot frame scheduler driven by the host's display refresh.
pub trait FrameClock {
    type Handle: Copy + PartialEq + std::fmt::Debug;
    type Error;

    fn request(&mut self) -> Result<Self::Handle, Self::Error>;

    fn cancel(&mut self, handle: Self::Handle);
}
