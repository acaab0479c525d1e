use serde::Serialize;

/// Rent multiplier applied once when the household outgrows its home.
pub const RELOCATION_SHOCK: f64 = 1.30;
const ADULTS: u32 = 2;

#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase", tag = "state")]
pub enum HousingState {
    Original,
    Relocated { age: u32 },
}

#[derive(Debug, Clone)]
pub struct HousingModel {
    monthly_rent: f64,
    annual_inflation: f64,
    rooms: f64,
    state: HousingState,
}

impl HousingModel {
    pub fn new(monthly_rent: f64, rooms: f64, annual_inflation: f64) -> Self {
        Self {
            monthly_rent: monthly_rent.max(0.0),
            annual_inflation,
            rooms,
            state: HousingState::Original,
        }
    }

    pub fn monthly_rent(&self) -> f64 {
        self.monthly_rent
    }

    pub fn annual_cost(&self) -> f64 {
        self.monthly_rent * 12.0
    }

    pub fn state(&self) -> HousingState {
        self.state
    }

    pub fn inflate_year(&mut self) {
        self.monthly_rent = (self.monthly_rent * (1.0 + self.annual_inflation)).max(0.0);
    }

    /// Returns true only on the call that relocates.
    pub fn evaluate_capacity(&mut self, active_children: u32, age: u32) -> bool {
        if self.state != HousingState::Original {
            return false;
        }
        if !exceeds_capacity(active_children, self.rooms) {
            return false;
        }
        self.monthly_rent *= RELOCATION_SHOCK;
        self.state = HousingState::Relocated { age };
        true
    }
}

pub fn exceeds_capacity(active_children: u32, rooms: f64) -> bool {
    (ADULTS + active_children) as f64 > rooms + 0.5
}
