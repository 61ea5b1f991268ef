//! Fixed workout and diet templates selected by intensity tier, plus the
//! workout builder sessions selected by location and equipment.

use crate::context::Intensity;
use serde::{Deserialize, Serialize};

pub struct WorkoutTemplate {
    pub name: &'static str,
    pub kind: &'static str,
    pub duration_minutes: u32,
    pub intensity_label: &'static str,
    pub instructions: &'static [&'static str],
    /// Percent
    pub success_likelihood: u8,
}

pub struct DietTemplate {
    pub meal_type: &'static str,
    pub description: &'static str,
    pub calories: u32,
    pub protein_g: u32,
    pub carbs_g: u32,
    pub fats_g: u32,
    pub suggestions: &'static [&'static str],
}

pub const RESTORATIVE_FLOW: WorkoutTemplate = WorkoutTemplate {
    name: "Restorative Flow",
    kind: "Yoga & Mobility",
    duration_minutes: 30,
    intensity_label: "Low",
    instructions: &[
        "Begin with 5 minutes of deep breathing exercises",
        "Gentle neck and shoulder rolls for 3 minutes",
        "Cat-cow stretches: 10 repetitions",
        "Child's pose hold for 2 minutes",
        "Supine spinal twist: 1 minute each side",
        "Legs up the wall for 5 minutes",
        "End with 5 minutes of savasana",
    ],
    success_likelihood: 95,
};

pub const DYNAMIC_STRENGTH_CIRCUIT: WorkoutTemplate = WorkoutTemplate {
    name: "Dynamic Strength Circuit",
    kind: "Full Body Strength",
    duration_minutes: 45,
    intensity_label: "Moderate",
    instructions: &[
        "Warm-up: 5 minutes of jumping jacks and arm circles",
        "Squats: 3 sets of 12 repetitions",
        "Push-ups: 3 sets of 10 repetitions",
        "Lunges: 3 sets of 10 each leg",
        "Plank holds: 3 sets of 30 seconds",
        "Dumbbell rows: 3 sets of 12 each arm",
        "Cool-down: 5 minutes of stretching",
    ],
    success_likelihood: 82,
};

pub const PEAK_PERFORMANCE_HIIT: WorkoutTemplate = WorkoutTemplate {
    name: "Peak Performance HIIT",
    kind: "High-Intensity Interval",
    duration_minutes: 50,
    intensity_label: "High",
    instructions: &[
        "Dynamic warm-up: 7 minutes",
        "Burpees: 4 sets of 15 repetitions",
        "Box jumps or step-ups: 4 sets of 12",
        "Mountain climbers: 4 sets of 20 each side",
        "Kettlebell swings: 4 sets of 15",
        "Sprint intervals: 8 rounds of 30 seconds on, 30 off",
        "Cool-down and stretch: 8 minutes",
    ],
    success_likelihood: 75,
};

pub const HIGH_PROTEIN_RECOVERY: DietTemplate = DietTemplate {
    meal_type: "High-Protein Recovery",
    description: "Focus on protein-rich foods within 30 minutes post-workout for optimal muscle recovery.",
    calories: 2400,
    protein_g: 140,
    carbs_g: 280,
    fats_g: 70,
    suggestions: &[
        "Greek yogurt with berries and honey",
        "Grilled chicken with quinoa and vegetables",
        "Protein shake with banana post-workout",
        "Salmon with sweet potato for dinner",
    ],
};

pub const BALANCED_ENERGY: DietTemplate = DietTemplate {
    meal_type: "Balanced Energy",
    description: "Maintain steady energy with complex carbs and lean proteins throughout the day.",
    calories: 2000,
    protein_g: 100,
    carbs_g: 250,
    fats_g: 65,
    suggestions: &[
        "Oatmeal with nuts and fruit for breakfast",
        "Mixed salad with grilled protein",
        "Whole grain wrap with lean meat",
        "Light fish with steamed vegetables",
    ],
};

pub fn workout_for(intensity: Intensity) -> &'static WorkoutTemplate {
    match intensity {
        Intensity::Light => &RESTORATIVE_FLOW,
        Intensity::Moderate => &DYNAMIC_STRENGTH_CIRCUIT,
        Intensity::Intense => &PEAK_PERFORMANCE_HIIT,
    }
}

pub fn diet_for(intensity: Intensity) -> &'static DietTemplate {
    match intensity {
        Intensity::Intense => &HIGH_PROTEIN_RECOVERY,
        Intensity::Light | Intensity::Moderate => &BALANCED_ENERGY,
    }
}

// ============================================================================
// Workout Builder
// ============================================================================

/// Where the builder session takes place
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrainingLocation {
    Gym,
    Home,
}

impl std::str::FromStr for TrainingLocation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "gym" => Ok(TrainingLocation::Gym),
            "home" => Ok(TrainingLocation::Home),
            _ => Err(format!("Unknown location: {}", s)),
        }
    }
}

/// Equipment picked in the builder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EquipmentChoice {
    Bodyweight,
    Dumbbells,
    Bands,
    FullGym,
}

impl std::str::FromStr for EquipmentChoice {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "bodyweight" => Ok(EquipmentChoice::Bodyweight),
            "dumbbells" => Ok(EquipmentChoice::Dumbbells),
            "bands" => Ok(EquipmentChoice::Bands),
            "full_gym" => Ok(EquipmentChoice::FullGym),
            _ => Err(format!("Unknown equipment: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BuilderExercise {
    pub name: &'static str,
    pub sets: &'static str,
    pub reps: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gif_url: Option<&'static str>,
}

impl BuilderExercise {
    const fn new(name: &'static str, sets: &'static str, reps: &'static str) -> Self {
        Self {
            name,
            sets,
            reps,
            gif_url: None,
        }
    }

    const fn with_gif(mut self, url: &'static str) -> Self {
        self.gif_url = Some(url);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BuilderWorkout {
    pub title: &'static str,
    pub description: &'static str,
    pub exercises: &'static [BuilderExercise],
}

pub const HOME_HIIT_BLAST: BuilderWorkout = BuilderWorkout {
    title: "Home HIIT Blast",
    description: "A high-energy session requiring zero equipment. Focus on form and speed.",
    exercises: &[
        BuilderExercise::new("Jumping Jacks", "3", "45 sec")
            .with_gif("https://commons.wikimedia.org/wiki/Special:FilePath/Jumpingjacks_wbs.gif"),
        BuilderExercise::new("Push-ups", "3", "15 reps")
            .with_gif("https://commons.wikimedia.org/wiki/Special:FilePath/Pushups_wbs.gif"),
        BuilderExercise::new("Air Squats", "4", "20 reps")
            .with_gif("https://commons.wikimedia.org/wiki/Special:FilePath/Squats_wbs.gif"),
        BuilderExercise::new("Mountain Climbers", "3", "30 sec"),
        BuilderExercise::new("Plank Hold", "3", "45 sec"),
    ],
};

pub const FULL_BODY_POWER: BuilderWorkout = BuilderWorkout {
    title: "Full Body Power",
    description: "Classic compound movements to build strength and endurance.",
    exercises: &[
        BuilderExercise::new("Barbell Squat", "4", "8-10 reps")
            .with_gif("https://media.tenor.com/D_i-W9mBbwsAAAAM/squat.gif"),
        BuilderExercise::new("Bench Press", "4", "8-10 reps"),
        BuilderExercise::new("Lat Pulldowns", "3", "12 reps"),
        BuilderExercise::new("Dumbbell Lunges", "3", "10/leg"),
        BuilderExercise::new("Cable Woodchoppers", "3", "15/side"),
    ],
};

pub const DYNAMIC_DUMBBELL_FLOW: BuilderWorkout = BuilderWorkout {
    title: "Dynamic Dumbbell Flow",
    description: "Perfect for home or a quiet gym corner. Keep resting periods short.",
    exercises: &[
        BuilderExercise::new("Goblet Squats", "3", "12 reps"),
        BuilderExercise::new("Dumbbell Rows", "3", "10/side"),
        BuilderExercise::new("Shoulder Press", "3", "10 reps"),
        BuilderExercise::new("Romanian Deadlifts", "3", "12 reps"),
        BuilderExercise::new("Russian Twists", "3", "20 reps"),
    ],
};

/// Pick a builder session. The gym wins regardless of equipment; anything
/// other than bodyweight at home gets the dumbbell flow.
pub fn builder_workout_for(
    location: Option<TrainingLocation>,
    equipment: Option<EquipmentChoice>,
) -> &'static BuilderWorkout {
    match (location, equipment) {
        (Some(TrainingLocation::Home), Some(EquipmentChoice::Bodyweight)) => &HOME_HIIT_BLAST,
        (Some(TrainingLocation::Gym), _) => &FULL_BODY_POWER,
        _ => &DYNAMIC_DUMBBELL_FLOW,
    }
}
