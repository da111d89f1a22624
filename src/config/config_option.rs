/// A configuration option, with bounds on the values it may take.
#[derive(Clone, Debug)]
pub struct ConfigOption<T> {
    pub name: &'static str,
    pub min: T,
    pub max: T,
    pub value: T,
}

impl<T: Clone + PartialOrd> ConfigOption<T> {
    pub fn min_max(&self) -> (T, T) {
        (self.min.clone(), self.max.clone())
    }

    /// Sets the value of the option, if within bounds.
    /// Returns true if the value was set, false otherwise.
    pub fn set(&mut self, value: T) -> bool {
        if value < self.min || value > self.max {
            log::warn!("Value for {} out of bounds", self.name);
            return false;
        }
        self.value = value;
        true
    }
}

impl<T: Copy> ConfigOption<T> {
    pub fn get(&self) -> T {
        self.value
    }
}
