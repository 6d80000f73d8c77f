//! Stock predicates for list and find operations.

use crate::model::room::{Room, RoomType};
use crate::model::student::Student;
use crate::store::Dataset;

pub fn show_all<T>() -> impl Fn(&T, &Dataset) -> bool {
    |_: &T, _: &Dataset| true
}

/// Rooms no allocation points at.
pub fn vacant_rooms() -> impl Fn(&Room, &Dataset) -> bool {
    |room: &Room, data: &Dataset| !data.is_room_allocated(room)
}

pub fn allocated_rooms() -> impl Fn(&Room, &Dataset) -> bool {
    |room: &Room, data: &Dataset| data.is_room_allocated(room)
}

pub fn room_type_is(room_type: RoomType) -> impl Fn(&Room, &Dataset) -> bool {
    move |room: &Room, _: &Dataset| room.room_type == room_type
}

pub fn unallocated_students() -> impl Fn(&Student, &Dataset) -> bool {
    |student: &Student, data: &Dataset| !data.is_student_allocated(student)
}

pub fn allocated_students() -> impl Fn(&Student, &Dataset) -> bool {
    |student: &Student, data: &Dataset| data.is_student_allocated(student)
}

/// Students whose name has a whole word equal to any keyword, ignoring case.
pub fn name_contains_keywords<I, S>(keywords: I) -> impl Fn(&Student, &Dataset) -> bool
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let keywords: Vec<String> = keywords
        .into_iter()
        .map(|keyword| keyword.as_ref().trim().to_lowercase())
        .filter(|keyword| !keyword.is_empty())
        .collect();
    move |student: &Student, _: &Dataset| {
        student
            .name
            .as_str()
            .split_whitespace()
            .map(str::to_lowercase)
            .any(|word| keywords.iter().any(|keyword| *keyword == word))
    }
}

#[cfg(test)]
mod tests {
    use super::{
        allocated_rooms, allocated_students, name_contains_keywords, show_all,
        unallocated_students, vacant_rooms,
    };
    use crate::model::allocation::Allocation;
    use crate::model::room::Room;
    use crate::model::student::Student;
    use crate::store::Dataset;

    fn student(name: &str, id: &str) -> Student {
        Student::parse(name, "87438807", "resident@example.com", "SOC", id)
            .expect("valid student")
    }

    #[test]
    fn allocation_predicates_split_entities_by_linkage() {
        let housed = student("Alex Yeoh", "E0000001");
        let waiting = student("Roy Balakrishnan", "E0000002");
        let taken = Room::parse(2, 10, "CN").unwrap();
        let free = Room::parse(2, 11, "CN").unwrap();
        let mut data = Dataset::new();
        data.add_student(housed.clone()).unwrap();
        data.add_student(waiting.clone()).unwrap();
        data.add_room(taken.clone()).unwrap();
        data.add_room(free.clone()).unwrap();
        data.add_allocation(Allocation::between(&housed, &taken)).unwrap();

        assert!(allocated_students()(&housed, &data));
        assert!(!allocated_students()(&waiting, &data));
        assert!(unallocated_students()(&waiting, &data));
        assert!(!unallocated_students()(&housed, &data));
        assert!(allocated_rooms()(&taken, &data));
        assert!(!allocated_rooms()(&free, &data));
        assert!(vacant_rooms()(&free, &data));
        assert!(show_all()(&taken, &data));
        assert!(show_all()(&waiting, &data));
    }

    #[test]
    fn keyword_match_is_whole_word_and_case_insensitive() {
        let student =
            Student::parse("David Li", "91031282", "lidavid@example.com", "ENG", "E0000004")
                .unwrap();
        let data = Dataset::new();

        assert!(name_contains_keywords(["DAVID"])(&student, &data));
        assert!(name_contains_keywords(["alex", "li"])(&student, &data));
        assert!(!name_contains_keywords(["dav"])(&student, &data));
        assert!(!name_contains_keywords(Vec::<String>::new())(&student, &data));
    }
}
