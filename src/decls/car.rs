use crate::decls::buffer_text;
use std::ffi::c_char;
use std::mem::MaybeUninit;

pub const MODEL_NAME_LEN: usize = 80;

/// Weight added by [`do_thing_to_car`].
pub const WEIGHT_STEP: f64 = 1.0;

/// A car record. Opaque outside this module.
///
/// There is no public constructor and no destructor. Storage comes from the
/// caller and [`init_car`] is the only way to bring it into a valid state.
#[repr(C)]
#[derive(Debug)]
pub struct Car {
    model_name: [c_char; MODEL_NAME_LEN],
    weight: f64,
}

pub type CarType = Car;
pub type ObfuscatedCar = CarType;

impl Car {
    pub fn model_name(&self) -> Option<&str> {
        buffer_text(&self.model_name)
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }

    fn blank() -> Self {
        Self {
            model_name: [0; MODEL_NAME_LEN],
            weight: 0.0,
        }
    }
}

/// Writes the default state (empty model name, zero weight) into `slot`.
pub fn init_car(slot: &mut MaybeUninit<Car>) -> &mut Car {
    slot.write(Car::blank())
}

/// Adds [`WEIGHT_STEP`] to the car's weight.
pub fn do_thing_to_car(car: &mut ObfuscatedCar) {
    car.weight += WEIGHT_STEP;
}
