use sea_orm_migration::prelude::*;

use crate::m20250301_000001_create_school_tables::{SchoolClasses, Schools, Students, Subjects};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 创建评分体系表
        manager
            .create_table(
                Table::create()
                    .table(GradingSystems::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(GradingSystems::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(GradingSystems::SchoolId).big_integer().not_null())
                    .col(ColumnDef::new(GradingSystems::Name).string().not_null())
                    .col(ColumnDef::new(GradingSystems::GradingType).string().not_null())
                    .col(
                        ColumnDef::new(GradingSystems::IsDefault)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(GradingSystems::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(ColumnDef::new(GradingSystems::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(GradingSystems::UpdatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(GradingSystems::Table, GradingSystems::SchoolId)
                            .to(Schools::Table, Schools::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建等级区间表
        manager
            .create_table(
                Table::create()
                    .table(GradeBands::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(GradeBands::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(GradeBands::GradingSystemId).big_integer().not_null())
                    .col(ColumnDef::new(GradeBands::MinScore).double().not_null())
                    .col(ColumnDef::new(GradeBands::MaxScore).double().not_null())
                    .col(ColumnDef::new(GradeBands::Grade).string().not_null())
                    .col(ColumnDef::new(GradeBands::Points).double().not_null().default(0.0))
                    .col(ColumnDef::new(GradeBands::Remarks).text().null())
                    .col(ColumnDef::new(GradeBands::SortOrder).integer().not_null().default(0))
                    .foreign_key(
                        ForeignKey::create()
                            .from(GradeBands::Table, GradeBands::GradingSystemId)
                            .to(GradingSystems::Table, GradingSystems::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建考试系列表
        manager
            .create_table(
                Table::create()
                    .table(ExamSeries::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ExamSeries::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ExamSeries::SchoolId).big_integer().not_null())
                    .col(ColumnDef::new(ExamSeries::Name).string().not_null())
                    .col(ColumnDef::new(ExamSeries::AcademicYear).string().not_null())
                    .col(ColumnDef::new(ExamSeries::Term).integer().not_null())
                    .col(ColumnDef::new(ExamSeries::StartDate).date().not_null())
                    .col(ColumnDef::new(ExamSeries::EndDate).date().not_null())
                    .col(ColumnDef::new(ExamSeries::IsActive).boolean().not_null().default(true))
                    .col(
                        ColumnDef::new(ExamSeries::IsPublished)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(ExamSeries::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(ExamSeries::UpdatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(ExamSeries::Table, ExamSeries::SchoolId)
                            .to(Schools::Table, Schools::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建考试类别表
        manager
            .create_table(
                Table::create()
                    .table(ExamCategories::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ExamCategories::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ExamCategories::SchoolId).big_integer().not_null())
                    .col(ColumnDef::new(ExamCategories::Name).string().not_null())
                    .col(ColumnDef::new(ExamCategories::Weight).double().not_null().default(100.0))
                    .col(ColumnDef::new(ExamCategories::CreatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(ExamCategories::Table, ExamCategories::SchoolId)
                            .to(Schools::Table, Schools::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建考试表
        manager
            .create_table(
                Table::create()
                    .table(Exams::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Exams::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Exams::SchoolId).big_integer().not_null())
                    .col(ColumnDef::new(Exams::ExamSeriesId).big_integer().not_null())
                    .col(ColumnDef::new(Exams::ExamCategoryId).big_integer().not_null())
                    .col(ColumnDef::new(Exams::GradingSystemId).big_integer().not_null())
                    .col(ColumnDef::new(Exams::Name).string().not_null())
                    .col(ColumnDef::new(Exams::StartDate).date().not_null())
                    .col(ColumnDef::new(Exams::EndDate).date().not_null())
                    .col(ColumnDef::new(Exams::ScopeType).string().not_null())
                    .col(ColumnDef::new(Exams::SubjectScopeType).string().not_null())
                    .col(ColumnDef::new(Exams::HasPractical).boolean().not_null().default(false))
                    .col(ColumnDef::new(Exams::TheoryPercentage).double().null())
                    .col(ColumnDef::new(Exams::PracticalPercentage).double().null())
                    .col(ColumnDef::new(Exams::Status).string().not_null())
                    .col(ColumnDef::new(Exams::CreatedBy).big_integer().null())
                    .col(ColumnDef::new(Exams::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Exams::UpdatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Exams::Table, Exams::SchoolId)
                            .to(Schools::Table, Schools::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Exams::Table, Exams::ExamSeriesId)
                            .to(ExamSeries::Table, ExamSeries::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Exams::Table, Exams::ExamCategoryId)
                            .to(ExamCategories::Table, ExamCategories::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Exams::Table, Exams::GradingSystemId)
                            .to(GradingSystems::Table, GradingSystems::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建考试-班级关联表
        manager
            .create_table(
                Table::create()
                    .table(ExamClasses::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ExamClasses::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ExamClasses::ExamId).big_integer().not_null())
                    .col(ColumnDef::new(ExamClasses::ClassId).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(ExamClasses::Table, ExamClasses::ExamId)
                            .to(Exams::Table, Exams::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(ExamClasses::Table, ExamClasses::ClassId)
                            .to(SchoolClasses::Table, SchoolClasses::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建考试-科目关联表
        manager
            .create_table(
                Table::create()
                    .table(ExamSubjects::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ExamSubjects::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ExamSubjects::ExamId).big_integer().not_null())
                    .col(ColumnDef::new(ExamSubjects::SubjectId).big_integer().not_null())
                    .col(
                        ColumnDef::new(ExamSubjects::TotalMarks)
                            .double()
                            .not_null()
                            .default(100.0),
                    )
                    .col(ColumnDef::new(ExamSubjects::PassMark).double().not_null().default(0.0))
                    .col(
                        ColumnDef::new(ExamSubjects::HasPapers)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(ExamSubjects::PaperCount).integer().null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(ExamSubjects::Table, ExamSubjects::ExamId)
                            .to(Exams::Table, Exams::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(ExamSubjects::Table, ExamSubjects::SubjectId)
                            .to(Subjects::Table, Subjects::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建试卷表
        manager
            .create_table(
                Table::create()
                    .table(ExamPapers::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ExamPapers::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ExamPapers::ExamId).big_integer().not_null())
                    .col(ColumnDef::new(ExamPapers::SubjectId).big_integer().not_null())
                    .col(ColumnDef::new(ExamPapers::PaperNumber).integer().not_null())
                    .col(ColumnDef::new(ExamPapers::Name).string().null())
                    .col(ColumnDef::new(ExamPapers::TotalMarks).double().not_null())
                    .col(ColumnDef::new(ExamPapers::PassMark).double().not_null().default(0.0))
                    .col(ColumnDef::new(ExamPapers::DurationMinutes).integer().null())
                    .col(ColumnDef::new(ExamPapers::PercentageWeight).double().not_null())
                    .col(
                        ColumnDef::new(ExamPapers::IsPractical)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(ExamPapers::CreatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(ExamPapers::Table, ExamPapers::ExamId)
                            .to(Exams::Table, Exams::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(ExamPapers::Table, ExamPapers::SubjectId)
                            .to(Subjects::Table, Subjects::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建考试成绩表
        manager
            .create_table(
                Table::create()
                    .table(ExamResults::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ExamResults::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ExamResults::ExamId).big_integer().not_null())
                    .col(ColumnDef::new(ExamResults::StudentId).big_integer().not_null())
                    .col(ColumnDef::new(ExamResults::SubjectId).big_integer().not_null())
                    .col(ColumnDef::new(ExamResults::TheoryScore).double().null())
                    .col(ColumnDef::new(ExamResults::PracticalScore).double().null())
                    .col(ColumnDef::new(ExamResults::TotalScore).double().not_null().default(0.0))
                    .col(ColumnDef::new(ExamResults::Grade).string().not_null())
                    .col(ColumnDef::new(ExamResults::Points).double().not_null().default(0.0))
                    .col(ColumnDef::new(ExamResults::Position).integer().null())
                    .col(ColumnDef::new(ExamResults::ClassPosition).integer().null())
                    .col(ColumnDef::new(ExamResults::StreamPosition).integer().null())
                    .col(ColumnDef::new(ExamResults::IsAbsent).boolean().not_null().default(false))
                    .col(ColumnDef::new(ExamResults::Remarks).text().null())
                    .col(ColumnDef::new(ExamResults::EnteredBy).big_integer().null())
                    .col(ColumnDef::new(ExamResults::EnteredAt).big_integer().not_null())
                    .col(ColumnDef::new(ExamResults::VerifiedBy).big_integer().null())
                    .col(ColumnDef::new(ExamResults::VerifiedAt).big_integer().null())
                    .col(ColumnDef::new(ExamResults::UpdatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(ExamResults::Table, ExamResults::ExamId)
                            .to(Exams::Table, Exams::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(ExamResults::Table, ExamResults::StudentId)
                            .to(Students::Table, Students::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(ExamResults::Table, ExamResults::SubjectId)
                            .to(Subjects::Table, Subjects::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建试卷成绩表
        manager
            .create_table(
                Table::create()
                    .table(ExamPaperResults::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ExamPaperResults::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ExamPaperResults::ExamResultId).big_integer().not_null())
                    .col(ColumnDef::new(ExamPaperResults::ExamPaperId).big_integer().not_null())
                    .col(ColumnDef::new(ExamPaperResults::StudentId).big_integer().not_null())
                    .col(ColumnDef::new(ExamPaperResults::Marks).double().not_null().default(0.0))
                    .col(
                        ColumnDef::new(ExamPaperResults::IsAbsent)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(ExamPaperResults::Position).integer().null())
                    .col(ColumnDef::new(ExamPaperResults::EnteredBy).big_integer().null())
                    .col(ColumnDef::new(ExamPaperResults::EnteredAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(ExamPaperResults::Table, ExamPaperResults::ExamResultId)
                            .to(ExamResults::Table, ExamResults::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(ExamPaperResults::Table, ExamPaperResults::ExamPaperId)
                            .to(ExamPapers::Table, ExamPapers::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建学期汇总表
        manager
            .create_table(
                Table::create()
                    .table(StudentTermSummaries::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(StudentTermSummaries::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(StudentTermSummaries::StudentId).big_integer().not_null())
                    .col(
                        ColumnDef::new(StudentTermSummaries::ExamSeriesId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(StudentTermSummaries::SchoolId).big_integer().not_null())
                    .col(ColumnDef::new(StudentTermSummaries::ClassId).big_integer().null())
                    .col(ColumnDef::new(StudentTermSummaries::StreamId).big_integer().null())
                    .col(ColumnDef::new(StudentTermSummaries::TotalSubjects).integer().not_null())
                    .col(ColumnDef::new(StudentTermSummaries::TotalPoints).double().not_null())
                    .col(
                        ColumnDef::new(StudentTermSummaries::TotalPossibleMarks)
                            .double()
                            .not_null(),
                    )
                    .col(ColumnDef::new(StudentTermSummaries::TotalGradePoints).double().not_null())
                    .col(ColumnDef::new(StudentTermSummaries::AverageScore).double().not_null())
                    .col(
                        ColumnDef::new(StudentTermSummaries::AveragePercentage)
                            .double()
                            .not_null(),
                    )
                    .col(ColumnDef::new(StudentTermSummaries::AverageGrade).string().not_null())
                    .col(ColumnDef::new(StudentTermSummaries::OverallPosition).integer().null())
                    .col(ColumnDef::new(StudentTermSummaries::ClassPosition).integer().null())
                    .col(ColumnDef::new(StudentTermSummaries::StreamPosition).integer().null())
                    .col(ColumnDef::new(StudentTermSummaries::GeneratedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(StudentTermSummaries::Table, StudentTermSummaries::StudentId)
                            .to(Students::Table, Students::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(StudentTermSummaries::Table, StudentTermSummaries::ExamSeriesId)
                            .to(ExamSeries::Table, ExamSeries::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 唯一约束
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("uq_exam_classes_exam_class")
                    .table(ExamClasses::Table)
                    .col(ExamClasses::ExamId)
                    .col(ExamClasses::ClassId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("uq_exam_subjects_exam_subject")
                    .table(ExamSubjects::Table)
                    .col(ExamSubjects::ExamId)
                    .col(ExamSubjects::SubjectId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("uq_exam_papers_exam_subject_number")
                    .table(ExamPapers::Table)
                    .col(ExamPapers::ExamId)
                    .col(ExamPapers::SubjectId)
                    .col(ExamPapers::PaperNumber)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("uq_exam_results_exam_student_subject")
                    .table(ExamResults::Table)
                    .col(ExamResults::ExamId)
                    .col(ExamResults::StudentId)
                    .col(ExamResults::SubjectId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("uq_exam_paper_results_result_paper")
                    .table(ExamPaperResults::Table)
                    .col(ExamPaperResults::ExamResultId)
                    .col(ExamPaperResults::ExamPaperId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("uq_term_summaries_student_series")
                    .table(StudentTermSummaries::Table)
                    .col(StudentTermSummaries::StudentId)
                    .col(StudentTermSummaries::ExamSeriesId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // 查询索引
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_grade_bands_system")
                    .table(GradeBands::Table)
                    .col(GradeBands::GradingSystemId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_exams_series")
                    .table(Exams::Table)
                    .col(Exams::ExamSeriesId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_exam_results_exam_subject")
                    .table(ExamResults::Table)
                    .col(ExamResults::ExamId)
                    .col(ExamResults::SubjectId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_term_summaries_series")
                    .table(StudentTermSummaries::Table)
                    .col(StudentTermSummaries::ExamSeriesId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 按照创建的相反顺序删除
        manager
            .drop_table(Table::drop().table(StudentTermSummaries::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ExamPaperResults::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ExamResults::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ExamPapers::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ExamSubjects::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ExamClasses::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Exams::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ExamCategories::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ExamSeries::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(GradeBands::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(GradingSystems::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum GradingSystems {
    #[sea_orm(iden = "grading_systems")]
    Table,
    Id,
    SchoolId,
    Name,
    GradingType,
    IsDefault,
    IsActive,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum GradeBands {
    #[sea_orm(iden = "grade_bands")]
    Table,
    Id,
    GradingSystemId,
    MinScore,
    MaxScore,
    Grade,
    Points,
    Remarks,
    SortOrder,
}

#[derive(DeriveIden)]
enum ExamSeries {
    #[sea_orm(iden = "exam_series")]
    Table,
    Id,
    SchoolId,
    Name,
    AcademicYear,
    Term,
    StartDate,
    EndDate,
    IsActive,
    IsPublished,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum ExamCategories {
    #[sea_orm(iden = "exam_categories")]
    Table,
    Id,
    SchoolId,
    Name,
    Weight,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Exams {
    #[sea_orm(iden = "exams")]
    Table,
    Id,
    SchoolId,
    ExamSeriesId,
    ExamCategoryId,
    GradingSystemId,
    Name,
    StartDate,
    EndDate,
    ScopeType,
    SubjectScopeType,
    HasPractical,
    TheoryPercentage,
    PracticalPercentage,
    Status,
    CreatedBy,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum ExamClasses {
    #[sea_orm(iden = "exam_classes")]
    Table,
    Id,
    ExamId,
    ClassId,
}

#[derive(DeriveIden)]
enum ExamSubjects {
    #[sea_orm(iden = "exam_subjects")]
    Table,
    Id,
    ExamId,
    SubjectId,
    TotalMarks,
    PassMark,
    HasPapers,
    PaperCount,
}

#[derive(DeriveIden)]
enum ExamPapers {
    #[sea_orm(iden = "exam_papers")]
    Table,
    Id,
    ExamId,
    SubjectId,
    PaperNumber,
    Name,
    TotalMarks,
    PassMark,
    DurationMinutes,
    PercentageWeight,
    IsPractical,
    CreatedAt,
}

#[derive(DeriveIden)]
enum ExamResults {
    #[sea_orm(iden = "exam_results")]
    Table,
    Id,
    ExamId,
    StudentId,
    SubjectId,
    TheoryScore,
    PracticalScore,
    TotalScore,
    Grade,
    Points,
    Position,
    ClassPosition,
    StreamPosition,
    IsAbsent,
    Remarks,
    EnteredBy,
    EnteredAt,
    VerifiedBy,
    VerifiedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum ExamPaperResults {
    #[sea_orm(iden = "exam_paper_results")]
    Table,
    Id,
    ExamResultId,
    ExamPaperId,
    StudentId,
    Marks,
    IsAbsent,
    Position,
    EnteredBy,
    EnteredAt,
}

#[derive(DeriveIden)]
enum StudentTermSummaries {
    #[sea_orm(iden = "student_term_summaries")]
    Table,
    Id,
    StudentId,
    ExamSeriesId,
    SchoolId,
    ClassId,
    StreamId,
    TotalSubjects,
    TotalPoints,
    TotalPossibleMarks,
    TotalGradePoints,
    AverageScore,
    AveragePercentage,
    AverageGrade,
    OverallPosition,
    ClassPosition,
    StreamPosition,
    GeneratedAt,
}
