//! 学校、班级、分流、学生、科目存储操作

use super::{SeaOrmStorage, write_err};
use crate::entity::prelude::*;
use crate::entity::{school_classes, schools, streams, students, subjects};
use crate::errors::{ExamSystemError, Result};
use crate::models::{
    PaginatedResponse, PaginationInfo, normalize_page,
    schools::{
        entities::{School, SchoolClass, Stream, Student, Subject},
        requests::{
            CreateSchoolClassRequest, CreateSchoolRequest, CreateStreamRequest,
            CreateStudentRequest, CreateSubjectRequest, StudentListQuery,
        },
    },
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
};

impl SeaOrmStorage {
    /// 创建学校
    pub async fn create_school_impl(&self, req: CreateSchoolRequest) -> Result<School> {
        let now = chrono::Utc::now().timestamp();

        let model = SchoolActiveModel {
            name: Set(req.name),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model.insert(&self.db).await.map_err(write_err("创建学校"))?;

        Ok(result.into_school())
    }

    pub async fn get_school_by_id_impl(&self, school_id: i64) -> Result<Option<School>> {
        let result = Schools::find_by_id(school_id)
            .one(&self.db)
            .await
            .map_err(|e| ExamSystemError::database_operation(format!("查询学校失败: {e}")))?;

        Ok(result.map(|m| m.into_school()))
    }

    pub async fn list_schools_impl(&self) -> Result<Vec<School>> {
        let result = Schools::find()
            .order_by_asc(schools::Column::Name)
            .all(&self.db)
            .await
            .map_err(|e| ExamSystemError::database_operation(format!("查询学校列表失败: {e}")))?;

        Ok(result.into_iter().map(|m| m.into_school()).collect())
    }

    /// 创建班级
    pub async fn create_school_class_impl(
        &self,
        school_id: i64,
        req: CreateSchoolClassRequest,
    ) -> Result<SchoolClass> {
        let model = SchoolClassActiveModel {
            school_id: Set(school_id),
            name: Set(req.name),
            created_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model.insert(&self.db).await.map_err(write_err("创建班级"))?;

        Ok(result.into_school_class())
    }

    pub async fn get_school_class_by_id_impl(&self, class_id: i64) -> Result<Option<SchoolClass>> {
        let result = SchoolClasses::find_by_id(class_id)
            .one(&self.db)
            .await
            .map_err(|e| ExamSystemError::database_operation(format!("查询班级失败: {e}")))?;

        Ok(result.map(|m| m.into_school_class()))
    }

    pub async fn list_school_classes_impl(&self, school_id: i64) -> Result<Vec<SchoolClass>> {
        let result = SchoolClasses::find()
            .filter(school_classes::Column::SchoolId.eq(school_id))
            .order_by_asc(school_classes::Column::Name)
            .all(&self.db)
            .await
            .map_err(|e| ExamSystemError::database_operation(format!("查询班级列表失败: {e}")))?;

        Ok(result.into_iter().map(|m| m.into_school_class()).collect())
    }

    /// 创建分流
    pub async fn create_stream_impl(&self, class_id: i64, req: CreateStreamRequest) -> Result<Stream> {
        let model = StreamActiveModel {
            class_id: Set(class_id),
            name: Set(req.name),
            created_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model.insert(&self.db).await.map_err(write_err("创建分流"))?;

        Ok(result.into_stream())
    }

    pub async fn get_stream_by_id_impl(&self, stream_id: i64) -> Result<Option<Stream>> {
        let result = Streams::find_by_id(stream_id)
            .one(&self.db)
            .await
            .map_err(|e| ExamSystemError::database_operation(format!("查询分流失败: {e}")))?;

        Ok(result.map(|m| m.into_stream()))
    }

    pub async fn list_streams_impl(&self, class_id: i64) -> Result<Vec<Stream>> {
        let result = Streams::find()
            .filter(streams::Column::ClassId.eq(class_id))
            .order_by_asc(streams::Column::Name)
            .all(&self.db)
            .await
            .map_err(|e| ExamSystemError::database_operation(format!("查询分流列表失败: {e}")))?;

        Ok(result.into_iter().map(|m| m.into_stream()).collect())
    }

    /// 创建学生
    pub async fn create_student_impl(
        &self,
        school_id: i64,
        req: CreateStudentRequest,
    ) -> Result<Student> {
        let model = StudentActiveModel {
            school_id: Set(school_id),
            class_id: Set(req.class_id),
            stream_id: Set(req.stream_id),
            admission_number: Set(req.admission_number),
            name: Set(req.name),
            is_active: Set(true),
            created_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model.insert(&self.db).await.map_err(write_err("创建学生"))?;

        Ok(result.into_student())
    }

    /// 分页列出学生
    pub async fn list_students_with_pagination_impl(
        &self,
        school_id: i64,
        query: StudentListQuery,
    ) -> Result<PaginatedResponse<Student>> {
        let (page, size) = normalize_page(query.page, query.size);

        let mut select = Students::find().filter(students::Column::SchoolId.eq(school_id));

        if let Some(class_id) = query.class_id {
            select = select.filter(students::Column::ClassId.eq(class_id));
        }
        if let Some(stream_id) = query.stream_id {
            select = select.filter(students::Column::StreamId.eq(stream_id));
        }

        let paginator = select
            .order_by_asc(students::Column::AdmissionNumber)
            .paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| ExamSystemError::database_operation(format!("查询学生总数失败: {e}")))?;

        let items = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| ExamSystemError::database_operation(format!("查询学生列表失败: {e}")))?;

        Ok(PaginatedResponse {
            items: items.into_iter().map(|m| m.into_student()).collect(),
            pagination: PaginationInfo::new(page, size, total),
        })
    }

    pub async fn get_students_by_ids_impl(&self, student_ids: &[i64]) -> Result<Vec<Student>> {
        if student_ids.is_empty() {
            return Ok(Vec::new());
        }

        let result = Students::find()
            .filter(students::Column::Id.is_in(student_ids.iter().copied()))
            .all(&self.db)
            .await
            .map_err(|e| ExamSystemError::database_operation(format!("查询学生失败: {e}")))?;

        Ok(result.into_iter().map(|m| m.into_student()).collect())
    }

    /// 创建科目
    pub async fn create_subject_impl(
        &self,
        school_id: i64,
        req: CreateSubjectRequest,
    ) -> Result<Subject> {
        let model = SubjectActiveModel {
            school_id: Set(school_id),
            name: Set(req.name),
            code: Set(req.code),
            created_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model.insert(&self.db).await.map_err(write_err("创建科目"))?;

        Ok(result.into_subject())
    }

    pub async fn list_subjects_impl(&self, school_id: i64) -> Result<Vec<Subject>> {
        let result = Subjects::find()
            .filter(subjects::Column::SchoolId.eq(school_id))
            .order_by_asc(subjects::Column::Code)
            .all(&self.db)
            .await
            .map_err(|e| ExamSystemError::database_operation(format!("查询科目列表失败: {e}")))?;

        Ok(result.into_iter().map(|m| m.into_subject()).collect())
    }
}
