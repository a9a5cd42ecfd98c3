use exam_latex_parser::error::StructureError;
use exam_latex_parser::models::loaders::load_exam_sources;
use exam_latex_parser::models::question::{AnswerLetter, ImageImportance, ImageType};
use exam_latex_parser::orchestrator::ExamStats;
use exam_latex_parser::services::dataset_writer::MERGED_FILE;
use exam_latex_parser::services::ImageStore;
use exam_latex_parser::utils::logging;
use exam_latex_parser::{
    process_exam, App, AppError, AppResult, Classifier, Config, QuestionFlow, QuestionRecord,
};
use std::fs;
use std::path::Path;

/// 不访问网络的分类器：科目固定为物理，图片固定为照片
struct StubClassifier;

impl Classifier for StubClassifier {
    async fn classify_subject(&self, _question_text: &str) -> AppResult<(String, String)> {
        Ok(("Física".to_string(), "Physics".to_string()))
    }

    async fn classify_image(
        &self,
        _image_path: &Path,
        _question_text: &str,
    ) -> AppResult<(ImageType, ImageImportance)> {
        Ok((ImageType::Photo, ImageImportance::Useful))
    }
}

fn letter_for(question: u32) -> AnswerLetter {
    AnswerLetter::ALL[((question - 1) % 5) as usize]
}

/// 两列答案表
fn gabarito(questions: u32) -> String {
    let mut tex = String::from("\\begin{tabular}{|c|c|}\n\\hline\n");
    for row in 0..questions.div_ceil(2) {
        let left = row * 2 + 1;
        let right = left + 1;
        tex.push_str(&format!(
            "{:02}-$\\text{{{}}}$ & {:02}-$\\text{{{}}}$ \\\\\n\\hline\n",
            left,
            letter_for(left),
            right,
            letter_for(right)
        ));
    }
    tex.push_str("\\end{tabular}\n");
    tex
}

fn prova(questions: u32, image_question: u32) -> String {
    let mut tex = String::from(
        "\\documentclass{article}\n\\begin{document}\n\
         Leia o texto para responder às questões 01 e 02.\n\
         Texto base compartilhado.\n",
    );
    for q in 1..=questions {
        tex.push_str(&format!("\\section*{{QUESTÃO {:02}}}\n", q));
        tex.push_str(&format!("Enunciado da questão {}.\n", q));
        if q == image_question {
            tex.push_str("\\includegraphics[width=5cm]{figura}\n");
        }
        tex.push_str("(A) alfa\n(B) beta\n(C) gama\n(D) delta\n(E) épsilon\n");
    }
    tex.push_str("\n\n\n\\end{document}");
    tex
}

fn write_year(root: &Path, year: u32, prova_tex: &str, gabarito_tex: &str) {
    let dir = root.join(year.to_string());
    fs::create_dir_all(dir.join("images")).unwrap();
    fs::write(dir.join("prova.tex"), prova_tex).unwrap();
    fs::write(dir.join("gabarito.tex"), gabarito_tex).unwrap();
    image::RgbImage::new(4, 4)
        .save(dir.join("images").join("figura.png"))
        .unwrap();
}

#[tokio::test]
async fn test_full_year_produces_dataset() {
    logging::init();

    let tmp = tempfile::tempdir().unwrap();
    let root = tmp.path().join("UNESP");
    write_year(&root, 2017, &prova(90, 45), &gabarito(90));
    // 非年份目录应被忽略
    fs::create_dir_all(root.join("rascunhos")).unwrap();

    let app = App::with_classifier(Config::default(), &root, StubClassifier);
    let summary = app.run().await.unwrap();
    assert_eq!(summary.years, vec![2017]);
    assert_eq!(summary.questions, 90);
    assert_eq!(summary.merged_images, 1);

    let content = fs::read_to_string(root.join("2017").join("prova.json")).unwrap();
    let records: Vec<QuestionRecord> = serde_json::from_str(&content).unwrap();
    assert_eq!(records.len(), 90);

    for (i, record) in records.iter().enumerate() {
        assert_eq!(record.original_question_num, i as u32 + 1);
        assert_eq!(record.options.len(), 4);
        assert_eq!(record.file_name, "UNESP2017_1fase_prova");
        let expected = match i {
            0..=19 => "Portuguese Language",
            20..=29 => "English",
            _ => "Physics",
        };
        assert_eq!(record.category_en, expected, "question {}", i + 1);
    }

    // 共享材料只拼接到第 1、2 题
    assert!(records[0].question_text.starts_with("Texto base compartilhado."));
    assert!(records[1].question_text.starts_with("Texto base compartilhado."));
    assert_eq!(records[2].question_text, "Enunciado da questão 3.");

    // 答案 E 时删除 A，下标为 3
    assert_eq!(records[4].answer, 3);
    assert_eq!(records[4].options, vec!["beta", "gama", "delta", "épsilon"]);
    // 其他情况删除 E，下标为字母位置
    assert_eq!(records[1].answer, 1);
    assert_eq!(records[1].options, vec!["alfa", "beta", "gama", "delta"]);

    let with_image = &records[44];
    assert_eq!(with_image.question_text, "Enunciado da questão 45.");
    assert_eq!(with_image.image_ref.as_deref(), Some("unesp_2017_45_figura.png"));
    assert_eq!(with_image.image_type, Some(ImageType::Photo));
    assert_eq!(with_image.image_importance, Some(ImageImportance::Useful));
    assert!(root.join("images").join("unesp_2017_45_figura.png").is_file());

    let merged: Vec<QuestionRecord> =
        serde_json::from_str(&fs::read_to_string(root.join(MERGED_FILE)).unwrap()).unwrap();
    assert_eq!(merged, records);
}

#[tokio::test]
async fn test_wrong_question_count_aborts_run() {
    let tmp = tempfile::tempdir().unwrap();
    let root = tmp.path().join("UNESP");
    write_year(&root, 2016, &prova(89, 0), &gabarito(90));

    let app = App::with_classifier(Config::default(), &root, StubClassifier);
    let err = app.run().await.unwrap_err();
    assert!(matches!(
        err,
        AppError::Structure(StructureError::QuestionCount {
            expected: 90,
            found: 89
        })
    ));
    assert!(!root.join(MERGED_FILE).exists());
}

#[tokio::test]
async fn test_exam_stats_count_images_and_trailing_text() {
    let tmp = tempfile::tempdir().unwrap();
    let root = tmp.path().join("UNESP");
    let prova_tex = prova(90, 45).replace(
        "(E) épsilon\n\\section*{QUESTÃO 61}",
        "(E) épsilon\nObservação final.\n\\section*{QUESTÃO 61}",
    );
    assert!(prova_tex.contains("Observação final."));
    write_year(&root, 2015, &prova_tex, &gabarito(90));

    let config = Config::default();
    let store = ImageStore::new(&root, config.legacy_jpg_prefix.clone());
    let flow = QuestionFlow::new(&config, StubClassifier, store);
    let sources = load_exam_sources(&root, 2015).await.unwrap();

    let (exam, stats) = process_exam(&flow, &sources, "UNESP", &config).await.unwrap();
    assert_eq!(exam.prova.len(), 90);
    assert_eq!(exam.gabarito.len(), 90);
    assert_eq!(
        stats,
        ExamStats {
            questions: 90,
            classified: 60,
            with_images: 1,
            trailing_text_warnings: 1,
        }
    );
}
