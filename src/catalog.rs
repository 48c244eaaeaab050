//! Hand-authored seed content: landmark images, the image-based questions
//! that use them, and how many text questions to request per quiz.

use crate::questions::{Question, QuestionOption};
use crate::quizzes::{WORLD_CAPITALS, WORLD_LANDMARKS};
use mongodb::bson::oid::ObjectId;

pub const IMAGE_MAP: [(&str, &str); 10] = [
    ("statue_of_liberty", "/images/statue_of_liberty.jpeg"),
    ("christ_the_redeemer", "/images/christ_the_redeemer.jpeg"),
    ("map_france", "/images/map_france.jpeg"),
    ("map_japan", "/images/map_japan.jpeg"),
    ("colosseum", "/images/colosseum.jpeg"),
    ("eiffel_tower", "/images/eiffel_tower.jpeg"),
    ("great_wall_of_china", "/images/great_wall_of_china.jpeg"),
    ("taj_mahal", "/images/taj_mahal.jpeg"),
    ("moai_statues", "/images/moai_statues.jpeg"),
    ("sydney_opera_house", "/images/sydney_opera_house.jpeg"),
];

/// (quiz title, number of questions to generate), processed in order.
pub const GENERATION_PLAN: [(&str, usize); 2] = [(WORLD_CAPITALS, 40), (WORLD_LANDMARKS, 30)];

pub fn image_path(key: &str) -> Option<&'static str> {
    IMAGE_MAP
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, path)| *path)
}

#[derive(Debug, Clone, Copy)]
pub struct CuratedQuestion {
    pub quiz_title: &'static str,
    pub question_text: &'static str,
    pub image_key: &'static str,
    pub options: [(&'static str, bool); 4],
    pub explanation: &'static str,
    pub timer: i32,
}

impl CuratedQuestion {
    pub fn into_question(self, quiz_id: ObjectId) -> Question {
        Question {
            quiz_id,
            question_text: self.question_text.to_owned(),
            question_image: image_path(self.image_key).map(str::to_owned),
            options: self
                .options
                .iter()
                .map(|(text, is_correct)| QuestionOption::new(text, *is_correct))
                .collect(),
            explanation: self.explanation.to_owned(),
            timer: self.timer,
        }
    }
}

pub const CURATED_QUESTIONS: [CuratedQuestion; 10] = [
    CuratedQuestion {
        quiz_title: WORLD_LANDMARKS,
        question_text: "What is the name of this famous statue in New York City?",
        image_key: "statue_of_liberty",
        options: [
            ("Statue of Unity", false),
            ("Statue of Liberty", true),
            ("Colossus of Rhodes", false),
            ("The Motherland Calls", false),
        ],
        explanation: "The Statue of Liberty was a gift from the people of France to the United States.",
        timer: 30,
    },
    CuratedQuestion {
        quiz_title: WORLD_LANDMARKS,
        question_text: "This statue of Jesus Christ is located in which Brazilian city?",
        image_key: "christ_the_redeemer",
        options: [
            ("São Paulo", false),
            ("Rio de Janeiro", true),
            ("Brasília", false),
            ("Salvador", false),
        ],
        explanation: "Christ the Redeemer overlooks Rio de Janeiro from the peak of Corcovado mountain.",
        timer: 30,
    },
    CuratedQuestion {
        quiz_title: WORLD_CAPITALS,
        question_text: "What is the capital of the country shown here?",
        image_key: "map_france",
        options: [
            ("Paris", true),
            ("Berlin", false),
            ("Madrid", false),
            ("Rome", false),
        ],
        explanation: "Paris, on the river Seine, is the capital and most populous city of France.",
        timer: 25,
    },
    CuratedQuestion {
        quiz_title: WORLD_CAPITALS,
        question_text: "Tokyo is the capital of which country?",
        image_key: "map_japan",
        options: [
            ("Japan", true),
            ("South Korea", false),
            ("China", false),
            ("Thailand", false),
        ],
        explanation: "Tokyo is the capital of Japan, known for its Imperial Palace.",
        timer: 20,
    },
    CuratedQuestion {
        quiz_title: WORLD_LANDMARKS,
        question_text: "This ancient amphitheater is a famous landmark in Rome, Italy.",
        image_key: "colosseum",
        options: [
            ("The Pantheon", false),
            ("The Colosseum", true),
            ("The Parthenon", false),
            ("Ephesus", false),
        ],
        explanation: "The Colosseum could hold an estimated 50,000 to 80,000 spectators.",
        timer: 30,
    },
    CuratedQuestion {
        quiz_title: WORLD_LANDMARKS,
        question_text: "This iconic iron tower is located in which European capital?",
        image_key: "eiffel_tower",
        options: [
            ("London", false),
            ("Berlin", false),
            ("Paris", true),
            ("Madrid", false),
        ],
        explanation: "The Eiffel Tower is one of the most recognizable structures in the world.",
        timer: 20,
    },
    CuratedQuestion {
        quiz_title: WORLD_LANDMARKS,
        question_text: "This series of fortifications was built across the historical northern borders of China.",
        image_key: "great_wall_of_china",
        options: [
            ("The Great Wall of China", true),
            ("Hadrian's Wall", false),
            ("The Silk Road", false),
            ("The Maginot Line", false),
        ],
        explanation: "The Great Wall of China is the world's longest wall and biggest ancient architecture.",
        timer: 25,
    },
    CuratedQuestion {
        quiz_title: WORLD_LANDMARKS,
        question_text: "This ivory-white marble mausoleum is located in Agra, India.",
        image_key: "taj_mahal",
        options: [
            ("Humayun's Tomb", false),
            ("Lotus Temple", false),
            ("The Taj Mahal", true),
            ("Red Fort", false),
        ],
        explanation: "The Taj Mahal was commissioned in 1632 by the Mughal emperor Shah Jahan.",
        timer: 25,
    },
    CuratedQuestion {
        quiz_title: WORLD_LANDMARKS,
        question_text: "These monolithic human figures were carved by the Rapa Nui people on which island?",
        image_key: "moai_statues",
        options: [
            ("Galapagos Islands", false),
            ("Easter Island", true),
            ("Svalbard", false),
            ("Madagascar", false),
        ],
        explanation: "The Moai statues were carved by the Rapa Nui people on Easter Island in eastern Polynesia.",
        timer: 35,
    },
    CuratedQuestion {
        quiz_title: WORLD_LANDMARKS,
        question_text: "This famous performing arts centre is located in which Australian city?",
        image_key: "sydney_opera_house",
        options: [
            ("Melbourne", false),
            ("Perth", false),
            ("Brisbane", false),
            ("Sydney", true),
        ],
        explanation: "The Sydney Opera House is a multi-venue performing arts centre in Sydney, Australia.",
        timer: 20,
    },
];
