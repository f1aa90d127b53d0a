//! Static question banks used when generation is unavailable.

use chrono::Utc;

use crate::models::{Difficulty, Question, QuestionSource};

struct BankEntry {
    text: String,
    options: [&'static str; 4],
    correct_index: u8,
    explanation: String,
}

fn fallback_bank(topic: &str, difficulty: Difficulty) -> [BankEntry; 5] {
    [
        BankEntry {
            text: format!("What is a key concept in {topic}?"),
            options: [
                "Basic fundamentals",
                "Advanced theories",
                "Key principles",
                "Core concepts",
            ],
            correct_index: 1,
            explanation: format!("This is a sample question about {topic} at {difficulty} level."),
        },
        BankEntry {
            text: format!("Which statement best describes {topic}?"),
            options: [
                "It's a fundamental concept",
                "It's an advanced topic",
                "It's a basic principle",
                "It's a complex theory",
            ],
            correct_index: 0,
            explanation: format!("This is another sample question about {topic}."),
        },
        BankEntry {
            text: "What is the capital of France?".to_string(),
            options: ["London", "Berlin", "Paris", "Madrid"],
            correct_index: 2,
            explanation: "Paris is the capital and largest city of France.".to_string(),
        },
        BankEntry {
            text: "Which planet is known as the Red Planet?".to_string(),
            options: ["Venus", "Mars", "Jupiter", "Saturn"],
            correct_index: 1,
            explanation: "Mars is known as the Red Planet due to iron oxide on its surface."
                .to_string(),
        },
        BankEntry {
            text: "What is the largest ocean on Earth?".to_string(),
            options: ["Atlantic Ocean", "Indian Ocean", "Arctic Ocean", "Pacific Ocean"],
            correct_index: 3,
            explanation: "The Pacific Ocean is the largest ocean, covering about 46% of Earth's water surface."
                .to_string(),
        },
    ]
}

/// Build `count` questions from the fallback bank, cycling through it.
pub fn fallback_questions(topic: &str, difficulty: Difficulty, count: usize) -> Vec<Question> {
    let bank = fallback_bank(topic, difficulty);
    let created_at = Utc::now();

    bank.iter()
        .cycle()
        .take(count)
        .zip(1u32..)
        .map(|(entry, id)| Question {
            id,
            text: entry.text.clone(),
            options: entry.options.map(String::from),
            correct_index: entry.correct_index,
            explanation: entry.explanation.clone(),
            topic: topic.to_string(),
            difficulty_level: difficulty,
            source: QuestionSource::Fallback,
            created_at,
        })
        .collect()
}

/// One entry of the fixed legacy sample set.
pub struct SampleQuestion {
    pub id: u32,
    pub text: &'static str,
    pub options: [&'static str; 4],
    pub correct_index: u8,
    pub explanation: &'static str,
}

const SAMPLE_QUESTIONS: [SampleQuestion; 10] = [
    SampleQuestion {
        id: 1,
        text: "What is the capital of France?",
        options: ["London", "Berlin", "Paris", "Madrid"],
        correct_index: 2,
        explanation: "Paris is the capital and largest city of France.",
    },
    SampleQuestion {
        id: 2,
        text: "In what year did the first man land on the moon?",
        options: ["1968", "1969", "1970", "1971"],
        correct_index: 1,
        explanation: "Neil Armstrong and Buzz Aldrin landed on the moon on July 20, 1969.",
    },
    SampleQuestion {
        id: 3,
        text: "What is the highest mountain in the world?",
        options: ["K2", "Mount Everest", "Kangchenjunga", "Lhotse"],
        correct_index: 1,
        explanation: "Mount Everest is the highest mountain in the world at 8,848.86 meters.",
    },
    SampleQuestion {
        id: 4,
        text: "Who painted the Mona Lisa?",
        options: ["Vincent van Gogh", "Leonardo da Vinci", "Pablo Picasso", "Michelangelo"],
        correct_index: 1,
        explanation: "The Mona Lisa was painted by Leonardo da Vinci between 1503 and 1519.",
    },
    SampleQuestion {
        id: 5,
        text: "What is the chemical symbol for gold?",
        options: ["Go", "Gd", "Au", "Ag"],
        correct_index: 2,
        explanation: "Au is the chemical symbol for gold, derived from the Latin word 'aurum'.",
    },
    SampleQuestion {
        id: 6,
        text: "Which planet is known as the Red Planet?",
        options: ["Venus", "Mars", "Jupiter", "Saturn"],
        correct_index: 1,
        explanation: "Mars is known as the Red Planet due to iron oxide on its surface.",
    },
    SampleQuestion {
        id: 7,
        text: "What is the largest ocean on Earth?",
        options: ["Atlantic Ocean", "Indian Ocean", "Arctic Ocean", "Pacific Ocean"],
        correct_index: 3,
        explanation: "The Pacific Ocean is the largest ocean, covering about 46% of Earth's water surface.",
    },
    SampleQuestion {
        id: 8,
        text: "Who wrote the play 'Romeo and Juliet'?",
        options: ["Charles Dickens", "William Shakespeare", "Jane Austen", "Mark Twain"],
        correct_index: 1,
        explanation: "Romeo and Juliet was written by William Shakespeare around 1594-1596.",
    },
    SampleQuestion {
        id: 9,
        text: "What is the smallest prime number?",
        options: ["0", "1", "2", "3"],
        correct_index: 2,
        explanation: "2 is the smallest prime number and the only even prime number.",
    },
    SampleQuestion {
        id: 10,
        text: "Which country hosted the 2016 Summer Olympics?",
        options: ["China", "Brazil", "United Kingdom", "Russia"],
        correct_index: 1,
        explanation: "Brazil hosted the 2016 Summer Olympics in Rio de Janeiro.",
    },
];

/// The fixed legacy sample set. Topic and difficulty do not filter it.
pub fn sample_questions() -> &'static [SampleQuestion] {
    &SAMPLE_QUESTIONS
}
