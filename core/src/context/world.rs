use super::Vec2;

/// Stage information exposed through `stagevar`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StageInfo {
    pub name: String,
    pub display_name: String,
    pub author_name: String,
}

/// Match-wide state shared by every combatant.
#[derive(Debug, Clone, PartialEq)]
pub struct World {
    pub game_time: i32,
    pub round_no: i32,
    pub round_state: i32,
    pub match_no: i32,
    pub match_over: bool,
    pub draw_game: bool,
    pub ticks_per_second: i32,
    pub game_width: i32,
    pub game_height: i32,
    pub screen_width: i32,
    pub screen_height: i32,
    pub camera_pos: Vec2,
    pub camera_zoom: f64,
    /// Vertical resolution the characters' coordinates are authored in.
    pub local_height: f64,
    pub stage: StageInfo,
}

impl Default for World {
    fn default() -> Self {
        Self {
            game_time: 0,
            round_no: 1,
            round_state: 2,
            match_no: 1,
            match_over: false,
            draw_game: false,
            ticks_per_second: 60,
            game_width: 320,
            game_height: 240,
            screen_width: 640,
            screen_height: 480,
            camera_pos: Vec2::default(),
            camera_zoom: 1.0,
            local_height: 240.0,
            stage: StageInfo::default(),
        }
    }
}

impl World {
    pub fn left_edge(&self) -> f64 {
        self.camera_pos.x - f64::from(self.game_width) / 2.0
    }

    pub fn right_edge(&self) -> f64 {
        self.camera_pos.x + f64::from(self.game_width) / 2.0
    }

    pub fn top_edge(&self) -> f64 {
        self.camera_pos.y
    }

    pub fn bottom_edge(&self) -> f64 {
        self.camera_pos.y + f64::from(self.game_height)
    }

    /// Converts a coordinate authored at `height` lines to local units.
    pub fn convert_from_resolution(&self, value: f64, height: f64) -> f64 {
        value * self.local_height / height
    }
}
