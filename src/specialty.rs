use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Medical specialties offered in the doctor form.
///
/// Free-text specialties that do not match a known label resolve to
/// [`MedicalSpecialty::Other`] and get the default icon and colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MedicalSpecialty {
    Allergology,
    Anesthesiology,
    Angiology,
    Cardiology,
    Dermatology,
    Endocrinology,
    Gastroenterology,
    GeneralPractice,
    Geriatrics,
    Gynecology,
    Hematology,
    Infectology,
    Nephrology,
    Neurology,
    Nutrology,
    Obstetrics,
    Oncology,
    Ophthalmology,
    Orthopedics,
    Otorhinolaryngology,
    Pediatrics,
    Pulmonology,
    Psychiatry,
    Radiology,
    Rheumatology,
    Traumatology,
    Urology,
    Other,
}

/// Lucide icon shown next to a specialty
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SpecialtyIcon {
    Heart,
    Baby,
    Activity,
    Hand,
    Bone,
    Eye,
    Brain,
    Stethoscope,
}

/// Tailwind background/text pair and the matching progress bar color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SpecialtyColor {
    pub class: &'static str,
    pub progress: &'static str,
}

const RED: SpecialtyColor = SpecialtyColor { class: "bg-red-500/10 text-red-600", progress: "#ef4444" };
const PINK: SpecialtyColor = SpecialtyColor { class: "bg-pink-500/10 text-pink-600", progress: "#ec4899" };
const BLUE: SpecialtyColor = SpecialtyColor { class: "bg-blue-500/10 text-blue-600", progress: "#3b82f6" };
const ORANGE: SpecialtyColor = SpecialtyColor { class: "bg-orange-500/10 text-orange-600", progress: "#f97316" };
const GRAY: SpecialtyColor = SpecialtyColor { class: "bg-gray-500/10 text-gray-600", progress: "#6b7280" };
const GREEN: SpecialtyColor = SpecialtyColor { class: "bg-green-500/10 text-green-600", progress: "#22c55e" };
const PURPLE: SpecialtyColor = SpecialtyColor { class: "bg-purple-500/10 text-purple-600", progress: "#a855f7" };

impl MedicalSpecialty {
    pub fn all() -> &'static [MedicalSpecialty] {
        use MedicalSpecialty::*;
        &[
            Allergology, Anesthesiology, Angiology, Cardiology, Dermatology, Endocrinology,
            Gastroenterology, GeneralPractice, Geriatrics, Gynecology, Hematology, Infectology,
            Nephrology, Neurology, Nutrology, Obstetrics, Oncology, Ophthalmology, Orthopedics,
            Otorhinolaryngology, Pediatrics, Pulmonology, Psychiatry, Radiology, Rheumatology,
            Traumatology, Urology,
        ]
    }

    /// Stable snake_case id, as used on the wire
    pub fn id(self) -> &'static str {
        use MedicalSpecialty::*;
        match self {
            Allergology => "allergology",
            Anesthesiology => "anesthesiology",
            Angiology => "angiology",
            Cardiology => "cardiology",
            Dermatology => "dermatology",
            Endocrinology => "endocrinology",
            Gastroenterology => "gastroenterology",
            GeneralPractice => "general_practice",
            Geriatrics => "geriatrics",
            Gynecology => "gynecology",
            Hematology => "hematology",
            Infectology => "infectology",
            Nephrology => "nephrology",
            Neurology => "neurology",
            Nutrology => "nutrology",
            Obstetrics => "obstetrics",
            Oncology => "oncology",
            Ophthalmology => "ophthalmology",
            Orthopedics => "orthopedics",
            Otorhinolaryngology => "otorhinolaryngology",
            Pediatrics => "pediatrics",
            Pulmonology => "pulmonology",
            Psychiatry => "psychiatry",
            Radiology => "radiology",
            Rheumatology => "rheumatology",
            Traumatology => "traumatology",
            Urology => "urology",
            Other => "other",
        }
    }

    /// Label as stored on the doctor record
    pub fn label(self) -> &'static str {
        use MedicalSpecialty::*;
        match self {
            Allergology => "Alergologia",
            Anesthesiology => "Anestesiologia",
            Angiology => "Angiologia",
            Cardiology => "Cardiologia",
            Dermatology => "Dermatologia",
            Endocrinology => "Endocrinologia",
            Gastroenterology => "Gastroenterologia",
            GeneralPractice => "Clínica Geral",
            Geriatrics => "Geriatria",
            Gynecology => "Ginecologia",
            Hematology => "Hematologia",
            Infectology => "Infectologia",
            Nephrology => "Nefrologia",
            Neurology => "Neurologia",
            Nutrology => "Nutrologia",
            Obstetrics => "Obstetrícia",
            Oncology => "Oncologia",
            Ophthalmology => "Oftalmologia",
            Orthopedics => "Ortopedia",
            Otorhinolaryngology => "Otorrinolaringologia",
            Pediatrics => "Pediatria",
            Pulmonology => "Pneumologia",
            Psychiatry => "Psiquiatria",
            Radiology => "Radiologia",
            Rheumatology => "Reumatologia",
            Traumatology => "Traumatologia",
            Urology => "Urologia",
            Other => "Outra",
        }
    }

    pub fn icon(self) -> SpecialtyIcon {
        use MedicalSpecialty::*;
        match self {
            Cardiology => SpecialtyIcon::Heart,
            Gynecology | Obstetrics => SpecialtyIcon::Baby,
            Pediatrics => SpecialtyIcon::Activity,
            Dermatology => SpecialtyIcon::Hand,
            Orthopedics | Traumatology => SpecialtyIcon::Bone,
            Ophthalmology => SpecialtyIcon::Eye,
            Neurology => SpecialtyIcon::Brain,
            _ => SpecialtyIcon::Stethoscope,
        }
    }

    pub fn color(self) -> SpecialtyColor {
        use MedicalSpecialty::*;
        match self {
            Cardiology => RED,
            Gynecology | Obstetrics => PINK,
            Pediatrics => BLUE,
            Dermatology => ORANGE,
            Orthopedics | Traumatology => GRAY,
            Ophthalmology => GREEN,
            Neurology => PURPLE,
            _ => BLUE,
        }
    }

    /// Resolve a stored specialty; unknown text becomes `Other`
    pub fn from_label(label: &str) -> Self {
        label.parse().unwrap_or(MedicalSpecialty::Other)
    }
}

impl fmt::Display for MedicalSpecialty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Exact match on the label (case-insensitive) or the snake_case id
impl FromStr for MedicalSpecialty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();

        MedicalSpecialty::all()
            .iter()
            .copied()
            .chain([MedicalSpecialty::Other])
            .find(|specialty| specialty.id() == wanted || specialty.label().to_lowercase() == wanted)
            .ok_or_else(|| format!("Unknown specialty: {}", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_labels_resolve_case_insensitively() {
        assert_eq!(MedicalSpecialty::from_label("Cardiologia"), MedicalSpecialty::Cardiology);
        assert_eq!(MedicalSpecialty::from_label("  obstetrícia "), MedicalSpecialty::Obstetrics);
        assert_eq!(MedicalSpecialty::from_label("general_practice"), MedicalSpecialty::GeneralPractice);
    }

    #[test]
    fn partial_matches_fall_back_to_other() {
        // No substring matching: a compound label is not guessed at
        let specialty = MedicalSpecialty::from_label("Cardiologia Pediátrica");
        assert_eq!(specialty, MedicalSpecialty::Other);
        assert_eq!(specialty.icon(), SpecialtyIcon::Stethoscope);
        assert_eq!(specialty.color().class, "bg-blue-500/10 text-blue-600");
    }

    #[test]
    fn icon_and_color_lookup() {
        use MedicalSpecialty::*;
        assert_eq!(Cardiology.icon(), SpecialtyIcon::Heart);
        assert_eq!(Cardiology.color().progress, "#ef4444");
        assert_eq!(Gynecology.icon(), Obstetrics.icon());
        assert_eq!(Traumatology.color(), Orthopedics.color());
        assert_eq!(Neurology.icon(), SpecialtyIcon::Brain);
        assert_eq!(Urology.icon(), SpecialtyIcon::Stethoscope);
    }

    #[test]
    fn every_label_round_trips() {
        for specialty in MedicalSpecialty::all() {
            assert_eq!(MedicalSpecialty::from_label(specialty.label()), *specialty);
        }
    }

    #[test]
    fn other_parses_by_label_and_id() {
        assert_eq!("Outra".parse::<MedicalSpecialty>(), Ok(MedicalSpecialty::Other));
        assert_eq!("other".parse::<MedicalSpecialty>(), Ok(MedicalSpecialty::Other));
        assert!("Cardiologia Pediátrica".parse::<MedicalSpecialty>().is_err());
    }

    #[test]
    fn ids_match_the_serialized_form() {
        for specialty in MedicalSpecialty::all().iter().chain([&MedicalSpecialty::Other]) {
            assert_eq!(serde_json::to_value(specialty).unwrap(), specialty.id());
            assert_eq!(specialty.id().parse::<MedicalSpecialty>(), Ok(*specialty));
        }
    }

    #[test]
    fn icons_serialize_as_lucide_names() {
        assert_eq!(serde_json::to_value(SpecialtyIcon::Stethoscope).unwrap(), "stethoscope");
    }
}
