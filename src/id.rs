use slotmap::new_key_type;

new_key_type! {
    /// Generation-checked handle to a city in a [`World`](crate::World).
    ///
    /// A handle to a destroyed city never resolves again, even if its slot
    /// is reused.
    pub struct CityId;

    /// Generation-checked handle to an alien in a [`World`](crate::World).
    pub struct AlienId;
}
