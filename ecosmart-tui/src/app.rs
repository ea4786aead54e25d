use ecosmart_core::{
    materials::MaterialCategory,
    model::{GeocodedLocation, LocatorOutcome, RecyclingCenter},
    ports::PortError,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Screen {
    Search,
    Results,
    CenterDetail,
}

pub(crate) struct App {
    pub screen: Screen,

    pub location_input: String,
    pub material_index: usize,

    pub location: Option<GeocodedLocation>,
    pub centers: Vec<RecyclingCenter>,
    pub center_list_index: usize,

    pub is_loading: bool,
    pub error_message: Option<String>,
}

impl App {
    pub(crate) fn new() -> Self {
        Self {
            screen: Screen::Search,
            location_input: String::new(),
            material_index: 0,
            location: None,
            centers: Vec::new(),
            center_list_index: 0,
            is_loading: false,
            error_message: None,
        }
    }

    pub(crate) fn material(&self) -> MaterialCategory {
        MaterialCategory::ALL
            .get(self.material_index)
            .copied()
            .unwrap_or(MaterialCategory::Any)
    }

    pub(crate) fn next_material(&mut self) {
        self.material_index = (self.material_index + 1) % MaterialCategory::ALL.len();
    }

    pub(crate) fn previous_material(&mut self) {
        let count = MaterialCategory::ALL.len();
        self.material_index = (self.material_index + count - 1) % count;
    }

    pub(crate) fn selected_center(&self) -> Option<&RecyclingCenter> {
        self.centers.get(self.center_list_index)
    }

    pub(crate) fn open_selected_center(&mut self) {
        if self.selected_center().is_some() {
            self.screen = Screen::CenterDetail;
        }
    }

    pub(crate) fn apply_outcome(&mut self, outcome: LocatorOutcome) {
        self.center_list_index = 0;
        match outcome {
            LocatorOutcome::NotFound => {
                self.location = None;
                self.centers.clear();
                self.screen = Screen::Search;
                self.error_message = Some(format!(
                    "Location not found: \"{}\". Try a city or postcode",
                    self.location_input.trim()
                ));
            }
            LocatorOutcome::Found { location, centers } => {
                if centers.is_empty() {
                    self.error_message = Some(format!(
                        "No recycling centers accepting {} found near {}",
                        self.material(),
                        location.display_name
                    ));
                    self.screen = Screen::Search;
                } else {
                    self.error_message = None;
                    self.screen = Screen::Results;
                }
                self.location = Some(location);
                self.centers = centers;
            }
        }
    }

    pub(crate) fn apply_error(&mut self, err: &PortError) {
        self.error_message = Some(format!("Search failed, try again later: {err}"));
    }
}
