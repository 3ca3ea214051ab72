use crate::models::skill::SkillCategory;

/// Built-in skill table in ranking tie-break order: canonical name, category, synonyms.
pub(crate) fn builtin_entries() -> Vec<(&'static str, SkillCategory, Vec<&'static str>)> {
    vec![
        (
            "Python",
            SkillCategory::Language,
            vec!["python", "pandas", "numpy", "scikit-learn", "sklearn"],
        ),
        ("Java", SkillCategory::Language, vec!["java", "spring", "jvm"]),
        ("C++", SkillCategory::Language, vec!["c++", "cpp", "stl"]),
        ("TensorFlow", SkillCategory::Framework, vec!["tensorflow", "tf", "keras"]),
        ("PyTorch", SkillCategory::Framework, vec!["pytorch", "torch", "torchvision"]),
        ("SQL", SkillCategory::Tool, vec!["sql", "postgres", "mysql", "sqlite"]),
        ("Docker", SkillCategory::Tool, vec!["docker", "container"]),
        ("Kubernetes", SkillCategory::Tool, vec!["kubernetes", "k8s"]),
        (
            "React",
            SkillCategory::Framework,
            vec!["react", "reactjs", "next.js", "nextjs", "vite"],
        ),
        (
            "NLP",
            SkillCategory::Domain,
            vec!["nlp", "bert", "transformer", "llm", "hugging face", "tokenization"],
        ),
        (
            "Computer Vision",
            SkillCategory::Domain,
            vec!["opencv", "vision", "cnn", "image classification", "yolo"],
        ),
        (
            "Data Engineering",
            SkillCategory::Domain,
            vec!["airflow", "etl", "spark", "hadoop"],
        ),
    ]
}
