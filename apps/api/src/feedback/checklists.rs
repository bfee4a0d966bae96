//! Static evaluation checklists.
//!
//! The generic checklist drives `/upload`; career-path checklists drive
//! `/upload-career` and are selected by exact (case-sensitive) name.

/// Generic 10-point resume checklist. Items are referenced by number in feedback.
pub const RESUME_CHECKLIST: &str = "\
Please evaluate the following resume based on these criteria:
1. Clear contact information
2. Professional summary or objective
3. Relevant experience
4. Skills section
5. Education section
6. Tailored keywords (specific to the job/industry)
7. Quantifiable achievements
8. Proper formatting (consistent, clean, readable)
9. Action-oriented language
10. No typos or grammar errors

For each point, provide feedback on whether it is present or missing and any suggestions for improvement.";

/// Placeholder checklist for unrecognized career paths.
pub const CAREER_PATH_NOT_FOUND: &str = "Career path not found.";

const DATA_SCIENTIST: &str = "\
Data scientist:
1. Python or R for data analysis (pandas, NumPy, tidyverse)
2. Statistics and probability (hypothesis testing, regression, experimental design)
3. SQL and working with relational data
4. Machine learning fundamentals (scikit-learn, model evaluation, feature engineering)
5. Data visualization (Matplotlib, Seaborn, Tableau or Power BI)
6. Data cleaning and wrangling of messy real-world datasets
7. Communicating findings to non-technical stakeholders
8. Big data tooling (Spark, Hadoop) or cloud data platforms";

const WEB_DEVELOPER: &str = "\
Web developer:
1. HTML5 and semantic markup
2. CSS3, responsive design and a layout system (Flexbox, Grid)
3. JavaScript (ES6+) and TypeScript
4. A front-end framework (React, Angular or Vue)
5. Back-end development (Node.js, Express or a comparable stack)
6. REST or GraphQL API design and consumption
7. Version control with Git
8. Web performance, accessibility and security basics";

const SOFTWARE_ENGINEER: &str = "\
Software engineer:
1. Proficiency in at least one systems or general-purpose language (Java, C++, Go, Rust, Python)
2. Data structures and algorithms
3. Object-oriented and functional design principles
4. Automated testing (unit, integration) and CI/CD
5. Databases (SQL and NoSQL)
6. Version control with Git and code review practices
7. Distributed systems and cloud platforms (AWS, GCP, Azure)
8. System design and scalability";

const MACHINE_LEARNING_SPECIALIST: &str = "\
Machine learning specialist:
1. Python and ML libraries (scikit-learn, TensorFlow, PyTorch)
2. Linear algebra, calculus and probability foundations
3. Supervised, unsupervised and deep learning techniques
4. Model evaluation, validation and hyperparameter tuning
5. Feature engineering and data preprocessing pipelines
6. Deploying and monitoring models in production (MLOps)
7. NLP or computer vision experience
8. Research literacy: reading and reproducing papers";

const GAME_DEVELOPER: &str = "\
Game developer:
1. C++ or C# programming
2. A game engine (Unity, Unreal Engine or Godot)
3. Game physics and mathematics (vectors, matrices, collision detection)
4. Graphics programming (shaders, rendering pipelines)
5. Gameplay programming and game design fundamentals
6. Performance profiling and optimization
7. Multiplayer networking
8. Shipped projects, game jams or a playable portfolio";

/// The career paths with a dedicated skills checklist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CareerPath {
    DataScientist,
    WebDeveloper,
    SoftwareEngineer,
    MachineLearningSpecialist,
    GameDeveloper,
}

impl CareerPath {
    pub const ALL: [CareerPath; 5] = [
        CareerPath::DataScientist,
        CareerPath::WebDeveloper,
        CareerPath::SoftwareEngineer,
        CareerPath::MachineLearningSpecialist,
        CareerPath::GameDeveloper,
    ];

    /// Exact-match lookup on the display name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|path| path.name() == name)
    }

    pub fn name(self) -> &'static str {
        match self {
            CareerPath::DataScientist => "Data Scientist",
            CareerPath::WebDeveloper => "Web Developer",
            CareerPath::SoftwareEngineer => "Software Engineer",
            CareerPath::MachineLearningSpecialist => "Machine Learning Specialist",
            CareerPath::GameDeveloper => "Game Developer",
        }
    }

    pub fn checklist(self) -> &'static str {
        match self {
            CareerPath::DataScientist => DATA_SCIENTIST,
            CareerPath::WebDeveloper => WEB_DEVELOPER,
            CareerPath::SoftwareEngineer => SOFTWARE_ENGINEER,
            CareerPath::MachineLearningSpecialist => MACHINE_LEARNING_SPECIALIST,
            CareerPath::GameDeveloper => GAME_DEVELOPER,
        }
    }
}

/// Checklist text for a career-path name, or the not-found placeholder.
pub fn career_checklist(name: &str) -> &'static str {
    CareerPath::from_name(name)
        .map(CareerPath::checklist)
        .unwrap_or(CAREER_PATH_NOT_FOUND)
}
